//! Values encoded by each fixture category.
//!
//! The order of every table is part of the fixture format: consumers address fixtures by
//! position.

use crate::{Category, Error};
use amino_cryptography::{ed25519, PublicKey};
use amino_types::{
    BlockId, Consensus, PartSetHeader, SignedMsgType, Timestamp, ValidatorHashInput, Vote,
};
use bytes::Bytes;
use chrono::{FixedOffset, NaiveDate};

/// 32-byte hash used by every block identifier fixture.
pub const HASH: &[u8; 32] = b"01234567890123456789012345678901";

/// Secret the fixture public key is derived from.
pub const KEY_SECRET: &[u8] = b"foo";

fn timestamp(
    category: Category,
    index: usize,
    seconds: i64,
    nanos: u32,
) -> Result<Timestamp, Error> {
    Timestamp::from_unix(seconds, nanos).map_err(|source| Error::Record {
        category,
        index,
        source,
    })
}

fn block_id(total: u32) -> BlockId {
    BlockId {
        hash: Bytes::from_static(HASH),
        parts: PartSetHeader {
            total,
            hash: Bytes::from_static(HASH),
        },
    }
}

/// Protocol versions, including ones with zero (omitted) fields.
pub fn versions() -> Vec<Consensus> {
    vec![
        Consensus {
            block: 1234,
            app: 5678,
        },
        Consensus { block: 1, app: 0 },
        Consensus { block: 0, app: 1 },
        Consensus { block: 0, app: 0 },
    ]
}

/// Standalone signed integers, followed by the boundaries of every varint length.
pub fn varints() -> Vec<i64> {
    vec![
        0,
        1,
        255,
        256,
        1234,
        100000,
        63,
        64,
        -1,
        -64,
        -65,
        8191,
        8192,
        1048575,
        1048576,
        10000000000,
        i64::MAX,
        i64::MIN,
    ]
}

/// Votes, for nil and for a block, with and without sub-second timestamps.
pub fn votes() -> Result<Vec<Vote>, Error> {
    let rows = [
        (0, 1, 2, BlockId::default(), 123456789, 123456789),
        (1, 1234567890, 0, block_id(1), 123456789, 123456789),
        (1, 1234567890, 0, block_id(1), 123456789, 0),
        (1, 1234567890, 0, block_id(123), 123456789, 0),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(index, (msg_type, height, round, block_id, seconds, nanos))| {
            Ok(Vote {
                msg_type: SignedMsgType(msg_type),
                height,
                round,
                block_id,
                timestamp: timestamp(Category::Vote, index, seconds, nanos)?,
                validator_address: Bytes::new(),
                validator_index: 0,
                signature: None,
            })
        })
        .collect()
}

/// Timestamps, ending with an instant constructed in `zone`.
pub fn times(zone: &FixedOffset) -> Result<Vec<Timestamp>, Error> {
    let mut times = Vec::with_capacity(4);
    for (index, (seconds, nanos)) in [(123456789, 123456789), (123456789, 0), (0, 123456789)]
        .into_iter()
        .enumerate()
    {
        times.push(timestamp(Category::Time, index, seconds, nanos)?);
    }

    let index = times.len();
    let local = NaiveDate::from_ymd_opt(2019, 6, 11)
        .and_then(|date| date.and_hms_nano_opt(20, 24, 8, 512_340_000))
        .and_then(|local| local.and_local_timezone(*zone).single())
        .ok_or_else(|| Error::Record {
            category: Category::Time,
            index,
            source: amino_codec::Error::InvalidTime(format!("no such local time in {zone}")),
        })?;
    let local = Timestamp::try_from(local).map_err(|source| Error::Record {
        category: Category::Time,
        index,
        source,
    })?;
    times.push(local);
    Ok(times)
}

/// Block identifiers, including the nil identifier.
pub fn block_ids() -> Vec<BlockId> {
    vec![BlockId::default(), block_id(1), block_id(123)]
}

/// The public key derived from [KEY_SECRET].
pub fn pubkey() -> PublicKey {
    PublicKey::from(ed25519::PrivateKey::from_secret(KEY_SECRET).public_key())
}

/// Validator hash inputs for [pubkey].
pub fn validator_hash_inputs() -> Vec<ValidatorHashInput> {
    [1234, 2000000]
        .into_iter()
        .map(|voting_power| ValidatorHashInput {
            pub_key: pubkey(),
            voting_power,
        })
        .collect()
}
