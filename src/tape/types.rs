use std::str::FromStr;
use std::fmt;
use binrw::binrw;

pub const CAS_SIGNATURE: [u8;8] = [0x1F,0xA6,0xDE,0xBA,0xCC,0x13,0x7D,0x74];
pub const LVT_SIGNATURE: [u8;9] = *b"LVOV/2.0/";
pub const SYNC_BYTE: u8 = 0xE6;
/// largest memory image an 8-bit machine can load
pub const MAX_BODY: usize = 0x10000;

/// Enumerates tape encoder errors.  The `Display` trait will print the
/// equivalent long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("invalid format specification")]
    UnknownFormat,
    #[error("input file too large")]
    TooBig
}

/// The ten tape framing variants.  Several extension tags share a variant;
/// `from_str` accepts any of them.
#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub enum TapeFormat {
    Rk,
    Rkp,
    Rkm,
    Rku,
    Rk4,
    Rks,
    Rko,
    Bru,
    Cas,
    Lvt
}

impl FromStr for TapeFormat {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        match s {
            "rk" | "rkr" | "rka" | "rk8" | "rke" | "rkl" => Ok(Self::Rk),
            "rkp" => Ok(Self::Rkp),
            "rkm" => Ok(Self::Rkm),
            "rku" => Ok(Self::Rku),
            "rk4" => Ok(Self::Rk4),
            "rks" => Ok(Self::Rks),
            "rko" => Ok(Self::Rko),
            "bru" | "ord" => Ok(Self::Bru),
            "cas" => Ok(Self::Cas),
            "lvt" => Ok(Self::Lvt),
            _ => Err(Error::UnknownFormat)
        }
    }
}

impl fmt::Display for TapeFormat {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rk => write!(f,"RK compatible"),
            Self::Rkp => write!(f,"RKP (RK compatible)"),
            Self::Rkm => write!(f,"RKM"),
            Self::Rku => write!(f,"RKU"),
            Self::Rk4 => write!(f,"RK4 (RK compatible)"),
            Self::Rks => write!(f,"RKS"),
            Self::Rko => write!(f,"RKO"),
            Self::Bru => write!(f,"BRU"),
            Self::Cas => write!(f,"CAS"),
            Self::Lvt => write!(f,"LVT")
        }
    }
}

impl TapeFormat {
    /// length of the embedded file name, zero when the format carries none
    pub fn name_len(&self) -> usize {
        match self {
            Self::Bru | Self::Rko => 8,
            Self::Cas | Self::Lvt => 6,
            _ => 0
        }
    }
}

// Byte-exact header and footer records.  Address pairs in the RK family go
// out high byte first; RKS, BRU, CAS and LVT are little-endian throughout.
// The RKO wrapper is little-endian except for its length field.

#[binrw]
#[brw(big)]
pub struct RkHeader {
    pub load_addr: u16,
    pub end_addr: u16
}

#[binrw]
#[brw(big)]
pub struct RkFooter {
    pub null_bytes: [u8;2],
    pub sync_byte: u8,
    pub checksum: u16
}

#[binrw]
#[brw(big)]
pub struct RkpFooter {
    pub null_byte: u8,
    pub sync_byte: u8,
    pub checksum: u16
}

#[binrw]
#[brw(big)]
pub struct Rk4Footer {
    pub null_bytes: [u8;16],
    pub sync_byte: u8,
    /// the checksum is stored twice, loaders may check either copy
    pub checksum1: u16,
    pub checksum2: u16
}

#[binrw]
#[brw(big)]
pub struct RkmFooter {
    pub checksum: u16
}

#[binrw]
#[brw(little)]
pub struct RksHeader {
    pub load_addr: u16,
    pub end_addr: u16
}

#[binrw]
#[brw(little)]
pub struct RksFooter {
    pub checksum: u16
}

#[binrw]
#[brw(little)]
pub struct BruHeader {
    pub name: [u8;8],
    pub load_addr: u16,
    pub len: u16,
    pub attr: u8,
    pub reserved: [u8;3]
}

#[binrw]
#[brw(little)]
pub struct RkoHeader {
    pub name: [u8;8],
    pub null_bytes: [u8;64],
    pub sync_byte: u8,
    pub load_addr: u16,
    /// transmitted high byte first, unlike the nested header's copy
    #[brw(big)]
    pub len: u16,
    pub bru: BruHeader
}

#[binrw]
#[brw(little)]
pub struct CasHeader {
    pub signature1: [u8;8],
    pub d0: [u8;10],
    pub name: [u8;6],
    pub padding: [u8;8],
    pub signature2: [u8;8],
    pub load_addr: u16,
    pub end_addr: u16,
    pub run_addr: u16
}

#[binrw]
#[brw(little)]
pub struct LvtHeader {
    pub signature: [u8;9],
    pub d0: u8,
    pub name: [u8;6],
    pub load_addr: u16,
    pub end_addr: u16,
    pub run_addr: u16
}
