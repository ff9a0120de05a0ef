pub const TRACKS: usize = 160;
pub const SECTORS_PER_TRACK: usize = 5;
pub const TOTAL_SECTORS: usize = TRACKS * SECTORS_PER_TRACK;
pub const TRACK_LEN: usize = 3125;
pub const SECTOR_LEN: usize = 512;
pub const IMAGE_SIZE: usize = TRACKS * TRACK_LEN;
/// span of one framed sector within a track, gap excluded
pub const SLOT_LEN: usize = 586;
pub const VTOC_TRACK: usize = 32;
pub const VTOC_LEN: usize = 160;
pub const DIR_ENTRY_LEN: usize = 21;
pub const DIR_ENTRY_OFFSET: usize = 7;
pub const DIR_ENTRIES_PER_SECTOR: usize = 23;
/// byte offset within a T/S-list sector where the pair area ends
pub const TSLIST_PAIR_LIMIT: usize = 254;
pub const MAX_DIRECTORY_REPS: usize = 100;
pub const MAX_TSLIST_REPS: usize = 1000;

pub const SYNC_BYTE: u8 = 0x06;
pub const ADDR_MARK: [u8;2] = [0xEA,0xD3];
pub const DATA_MARK: [u8;2] = [0xDD,0xF3];
/// physical slot `k` carries logical sector `INTERLEAVE[k]`
pub const INTERLEAVE: [u8;SECTORS_PER_TRACK] = [0,3,1,4,2];

pub const ATTR_READ_ONLY: u8 = 0x80;
pub const ATTR_HIDDEN: u8 = 0x40;

/// Enumerates RKDOS errors.  The `Display` trait will print the equivalent
/// long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("bad disk image")]
    BadDiskFormat,
    #[error("no filesystem on image")]
    NoFilesystem,
    #[error("sector not found: track {track}, sector {sector}")]
    SectorNotFound { track: u8, sector: u8 },
    #[error("insufficient disk space")]
    DiskFull,
    #[error("no more dir entries")]
    DirFull,
    #[error("file not found")]
    FileNotFound,
    #[error("file already exists")]
    FileExists
}

/// In-memory descriptor of one physical sector.  The offset points at the
/// first data byte inside the image buffer, just past the length prefix;
/// the length prefix itself sits at `offset-3..offset-1` and the checksum
/// at `offset+len`.
#[derive(Clone,Copy,Default)]
pub struct SectorDesc {
    pub offset: usize,
    pub len: usize,
    pub dirty: bool,
    pub allocated: bool
}

/// Runtime view of one directory entry, with the byte size computed from the
/// T/S-list chain.
#[derive(Clone)]
pub struct FileInfo {
    pub name: String,
    pub dir_track: u8,
    pub dir_sector: u8,
    /// entry offset within the directory sector data
    pub dir_offset: usize,
    pub tslist_track: u8,
    pub tslist_sector: u8,
    pub load_addr: u16,
    /// sector count including T/S-list sectors
    pub sector_count: u16,
    pub attr: u8,
    pub size: usize
}

impl FileInfo {
    pub fn read_only(&self) -> bool {
        self.attr & ATTR_READ_ONLY > 0
    }
    pub fn hidden(&self) -> bool {
        self.attr & ATTR_HIDDEN > 0
    }
}

/// Normalize an external file name to the stored form: upper case, base name
/// cut at the last period and truncated to 10 characters, extension truncated
/// to 3, anything outside `[A-Z0-9 .]` replaced with `_`.  Every lookup goes
/// through this, which is what makes lookups case-insensitive.
pub fn normalize_name(name: &str) -> String {
    let sanitized: String = name.chars().map(|ch| {
        let ch = ch.to_ascii_uppercase();
        match ch {
            'A'..='Z' | '0'..='9' | ' ' | '.' => ch,
            _ => '_'
        }
    }).collect();
    match sanitized.rfind('.') {
        Some(pos) => {
            let base: String = sanitized[..pos].chars().take(10).collect();
            let ext: String = sanitized[pos+1..].chars().take(3).collect();
            match ext.len() {
                0 => base,
                _ => [base,ext].join(".")
            }
        },
        None => sanitized.chars().take(10).collect()
    }
}
