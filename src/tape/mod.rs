//! # Tape Encoder Module
//!
//! Wraps a raw memory image in one of the cassette framing variants used by
//! the RK86 family and its relatives.  Each variant is a fixed header, the
//! body verbatim, and possibly a footer carrying a checksum; see `types` for
//! the byte-exact records.  Encoding is pure, file handling belongs to the
//! caller.

pub mod types;

use binrw::BinWrite;
use types::*;
use crate::DYNERR;

/// serialize one binrw record
macro_rules! pack {
    ($rec:expr) => {{
        let mut cur = binrw::io::Cursor::new(Vec::new());
        ($rec).write(&mut cur)?;
        cur.into_inner()
    }};
}

/// Accumulate the RK tape checksum over one chunk.  Every byte is added to
/// both halves of the accumulator, except that on the last chunk the final
/// byte goes into the low half only, with no carry into the high half.
pub fn add_to_rk_checksum(base: u16,data: &[u8],last_chunk: bool) -> u16 {
    let mut cs = base;
    let special = last_chunk && !data.is_empty();
    let count = match special {
        true => data.len() - 1,
        false => data.len()
    };
    for i in 0..count {
        cs = cs.wrapping_add(data[i] as u16).wrapping_add((data[i] as u16) << 8);
    }
    if special {
        cs = (cs & 0xFF00) | (cs.wrapping_add(data[count] as u16) & 0x00FF);
    }
    cs
}

/// RK checksum of a whole buffer.
pub fn rk_checksum(data: &[u8]) -> u16 {
    add_to_rk_checksum(0,data,true)
}

/// Mikrosha checksum: XOR, even offsets into the low byte, odd offsets into
/// the high byte.
pub fn rkm_checksum(data: &[u8]) -> u16 {
    let mut cs: u16 = 0;
    for (i,b) in data.iter().enumerate() {
        cs ^= match i % 2 {
            0 => *b as u16,
            _ => (*b as u16) << 8
        };
    }
    cs
}

/// UT-88 checksum: plain 16-bit modular sum.
pub fn rku_checksum(data: &[u8]) -> u16 {
    data.iter().fold(0u16,|cs,b| cs.wrapping_add(*b as u16))
}

/// Build the embedded file name: everything before the first period, upper
/// cased, restricted to digits, letters and spaces with `-` standing in for
/// anything else, space-padded to `len`.
pub fn internal_name(name: &str,len: usize) -> Vec<u8> {
    let stem = match name.find('.') {
        Some(pos) => &name[..pos],
        None => name
    };
    let mut ans: Vec<u8> = stem.chars().take(len).map(|ch| {
        let ch = ch.to_ascii_uppercase();
        match ch {
            'A'..='Z' | '0'..='9' | ' ' => ch as u8,
            _ => b'-'
        }
    }).collect();
    ans.resize(len,b' ');
    ans
}

fn bru_header(name: &[u8],load_addr: u16,len: u16) -> BruHeader {
    let mut name_buf = [0u8;8];
    name_buf.copy_from_slice(&name[0..8]);
    BruHeader {
        name: name_buf,
        load_addr,
        len,
        attr: 0,
        reserved: [0xFF;3]
    }
}

/// Wrap `body` in the framing of `format` and return header ∥ body ∥ footer.
/// `run_addr` only matters for CAS and LVT, `name` only for the formats that
/// embed one.
pub fn encode(body: &[u8],format: TapeFormat,load_addr: u16,run_addr: u16,name: &str) -> Result<Vec<u8>,DYNERR> {
    if body.len() > MAX_BODY {
        return Err(Box::new(Error::TooBig));
    }
    let end_addr = load_addr.wrapping_add(body.len() as u16).wrapping_sub(1);
    let int_name = internal_name(name,usize::max(format.name_len(),8));
    let (header,footer) = match format {
        TapeFormat::Rk | TapeFormat::Rkp | TapeFormat::Rkm | TapeFormat::Rku | TapeFormat::Rk4 => {
            let header = pack!(RkHeader { load_addr, end_addr });
            let cs = match format {
                TapeFormat::Rkm => rkm_checksum(body),
                TapeFormat::Rku => rku_checksum(body),
                _ => rk_checksum(body)
            };
            let footer = match format {
                TapeFormat::Rkp => pack!(RkpFooter { null_byte: 0, sync_byte: SYNC_BYTE, checksum: cs }),
                TapeFormat::Rkm => pack!(RkmFooter { checksum: cs }),
                TapeFormat::Rk4 => pack!(Rk4Footer { null_bytes: [0;16], sync_byte: SYNC_BYTE, checksum1: cs, checksum2: cs }),
                _ => pack!(RkFooter { null_bytes: [0;2], sync_byte: SYNC_BYTE, checksum: cs })
            };
            (header,footer)
        },
        TapeFormat::Rks => {
            let cs = rk_checksum(body);
            let header = pack!(RksHeader { load_addr, end_addr });
            let footer = pack!(RksFooter { checksum: cs });
            (header,footer)
        },
        TapeFormat::Bru => {
            let header = pack!(bru_header(&int_name,load_addr,body.len() as u16));
            (header,Vec::new())
        },
        TapeFormat::Rko => {
            let bru = bru_header(&int_name,load_addr,body.len() as u16);
            let bru_bytes = pack!(&bru);
            let mut name_buf = [0u8;8];
            name_buf.copy_from_slice(&int_name[0..8]);
            let header = pack!(RkoHeader {
                name: name_buf,
                null_bytes: [0;64],
                sync_byte: SYNC_BYTE,
                load_addr,
                len: (body.len() as u16).wrapping_add(16),
                bru
            });
            // pad the stream out to a 16 byte boundary, then sync and checksum
            let padding = 0usize.wrapping_sub(header.len() + body.len()) & 0x0F;
            let mut cs = add_to_rk_checksum(0,&bru_bytes,false);
            cs = add_to_rk_checksum(cs,body,false);
            cs = add_to_rk_checksum(cs,&vec![0;padding],true);
            let mut footer = vec![0;padding];
            footer.push(SYNC_BYTE);
            footer.push((cs >> 8) as u8);
            footer.push((cs & 0xFF) as u8);
            (header,footer)
        },
        TapeFormat::Cas => {
            let mut name_buf = [0u8;6];
            name_buf.copy_from_slice(&int_name[0..6]);
            let header = pack!(CasHeader {
                signature1: CAS_SIGNATURE,
                d0: [0xD0;10],
                name: name_buf,
                padding: [0;8],
                signature2: CAS_SIGNATURE,
                load_addr,
                end_addr,
                run_addr
            });
            (header,Vec::new())
        },
        TapeFormat::Lvt => {
            let mut name_buf = [0u8;6];
            name_buf.copy_from_slice(&int_name[0..6]);
            let header = pack!(LvtHeader {
                signature: LVT_SIGNATURE,
                d0: 0xD0,
                name: name_buf,
                load_addr,
                end_addr,
                run_addr
            });
            (header,Vec::new())
        }
    };
    Ok([header,body.to_vec(),footer].concat())
}
