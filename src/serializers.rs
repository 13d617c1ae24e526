//! Byte layouts shared by the coinbase, header and block encoders.

use super::*;

/// Compact size with exclusive tier bounds: `0xffff` already takes the five
/// byte form and `0xffff_ffff` the nine byte form, one tier above consensus
/// encoding. Every other value encodes as consensus does, and the nine byte
/// form carries the full 64-bit length.
pub fn var_int(value: u64) -> Vec<u8> {
    if value < 0xfd {
        vec![value as u8]
    } else if value < 0xffff {
        let mut buf = vec![0xfd];
        buf.extend_from_slice(&(value as u16).to_le_bytes());
        buf
    } else if value < 0xffff_ffff {
        let mut buf = vec![0xfe];
        buf.extend_from_slice(&(value as u32).to_le_bytes());
        buf
    } else {
        let mut buf = vec![0xff];
        buf.extend_from_slice(&value.to_le_bytes());
        buf
    }
}

/// Script push of a small integer, as used for the height and timestamp in
/// the coinbase signature script.
pub fn serialize_number(value: i64) -> Result<Vec<u8>, PoolError> {
    if value < 0 {
        return EncodingSnafu {
            message: format!("cannot serialize negative number {value}"),
        }
        .fail();
    }

    if (1..=16).contains(&value) {
        return Ok(vec![0x01, value as u8]);
    }

    let mut value = value as u64;
    let mut buf = vec![0u8];

    while value > 127 {
        buf.push((value & 0xff) as u8);
        value >>= 8;
    }

    buf.push(value as u8);
    buf[0] = (buf.len() - 1) as u8;

    Ok(buf)
}

pub fn serialize_string(value: &str) -> Result<Vec<u8>, PoolError> {
    let mut buf = length_prefix(value.len() as u64)?;
    buf.extend_from_slice(value.as_bytes());
    Ok(buf)
}

fn length_prefix(len: u64) -> Result<Vec<u8>, PoolError> {
    if len < 253 {
        Ok(vec![len as u8])
    } else if len < 0x1_0000 {
        let mut buf = vec![0xfd];
        buf.extend_from_slice(&(len as u16).to_le_bytes());
        Ok(buf)
    } else if len < 0x1_0000_0000 {
        let mut buf = vec![0xfe];
        buf.extend_from_slice(&(len as u32).to_le_bytes());
        Ok(buf)
    } else {
        EncodingSnafu {
            message: format!("string of {len} bytes exceeds the 32-bit length tier"),
        }
        .fail()
    }
}

/// Full coinbase transaction for one extranonce pair.
pub fn serialize_coinbase(job: &Job, extranonce1: &Extranonce, extranonce2: &Extranonce) -> Vec<u8> {
    let mut buf = Vec::with_capacity(
        job.coinbase_initial().len()
            + extranonce1.len()
            + extranonce2.len()
            + job.coinbase_final().len(),
    );
    buf.extend_from_slice(job.coinbase_initial());
    buf.extend_from_slice(extranonce1.as_bytes());
    buf.extend_from_slice(extranonce2.as_bytes());
    buf.extend_from_slice(job.coinbase_final());
    buf
}

/// 80 byte block header. Fields are laid out big-endian in reverse order and
/// the whole buffer is then flipped, which yields the consensus encoding.
/// `merkle_root` is in internal byte order.
pub fn serialize_header(job: &Job, merkle_root: &MerkleNode, ntime: Ntime, nonce: Nonce) -> [u8; 80] {
    let mut header = [0u8; 80];

    BigEndian::write_u32(&mut header[0..4], nonce.get());
    BigEndian::write_u32(&mut header[4..8], job.bits().to_consensus());
    BigEndian::write_u32(&mut header[8..12], ntime.get());

    let mut root = merkle_root.to_byte_array();
    root.reverse();
    header[12..44].copy_from_slice(&root);

    let mut previous = job.previous_block_hash().to_byte_array();
    previous.reverse();
    header[44..76].copy_from_slice(&previous);

    BigEndian::write_i32(&mut header[76..80], job.version().to_consensus());

    header.reverse();
    header
}

/// Candidate block: header, transaction count, coinbase, template
/// transactions and, for proof-of-stake hybrids, an empty signature byte.
pub fn serialize_block(
    job: &Job,
    header: &[u8],
    coinbase: &[u8],
    proof_of_stake_hybrid: bool,
) -> Vec<u8> {
    let transactions = job.transactions();

    let mut block = Vec::with_capacity(
        header.len()
            + 9
            + coinbase.len()
            + transactions.iter().map(Vec::len).sum::<usize>()
            + 1,
    );

    block.extend_from_slice(header);
    block.extend(var_int(transactions.len() as u64 + 1));
    block.extend_from_slice(coinbase);

    for transaction in transactions {
        block.extend_from_slice(transaction);
    }

    if proof_of_stake_hybrid {
        block.push(0);
    }

    block
}
