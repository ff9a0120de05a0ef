//! # RKDOS file system module
//!
//! This manipulates raw 500,000 byte floppy images carrying the RKDOS file
//! system used by Radio-86RK floppy controllers.  The physical layer is five
//! soft-sectored 512 byte sectors per 3,125 byte track, located by scanning
//! for address marks.  On top of that sit a VTOC allocation bitmap at track
//! 32 sector 0, a chained directory starting at track 32 sector 1, and per
//! file track/sector list chains.
//!
//! * The whole image is held in memory; mutations recompute the per-sector
//!   length prefix and checksum of every touched sector, and `save` writes
//!   the buffer back out
//! * The directory chain is laid down by `format` and never grown afterwards

pub mod types;
mod directory;

use log::{debug,info};
use types::*;
use directory::Entry;
use crate::img::{ImageFile,OpenMode};
use crate::{STDRESULT,DYNERR};

/// The primary interface for disk operations.
pub struct Disk {
    img: ImageFile,
    /// one descriptor per physical sector, indexed track-major
    sectors: Vec<SectorDesc>,
    files: Vec<FileInfo>,
    free_sectors: usize,
    free_dir_entries: usize,
    scanned: bool
}

impl Disk {
    /// Open an image file in the given mode.  `Create` sets up a blank
    /// zero-filled image that only reaches the host file system on `save`.
    pub fn open(img_path: &str,mode: OpenMode) -> Result<Self,DYNERR> {
        let img = match mode {
            OpenMode::Create => ImageFile::create(img_path,IMAGE_SIZE),
            _ => ImageFile::open(img_path,mode)?
        };
        Ok(Self::from_img(img))
    }
    /// Create a disk file system using the given image as storage.
    /// The `Disk` takes ownership of the image.
    pub fn from_img(img: ImageFile) -> Self {
        Self {
            img,
            sectors: vec![SectorDesc::default();TOTAL_SECTORS],
            files: Vec::new(),
            free_sectors: 0,
            free_dir_entries: 0,
            scanned: false
        }
    }
    fn idx(track: usize,sector: usize) -> usize {
        track*SECTORS_PER_TRACK + sector
    }
    fn check_ts(track: usize,sector: usize) -> STDRESULT {
        if track >= TRACKS || sector >= SECTORS_PER_TRACK {
            return Err(Box::new(Error::SectorNotFound { track: track as u8, sector: sector as u8 }));
        }
        Ok(())
    }

    /// Parse the image once; later calls are free.  Mutating operations keep
    /// the cached state current themselves.
    fn read_disk(&mut self) -> STDRESULT {
        if self.scanned {
            return Ok(());
        }
        self.read_sectors()?;
        self.read_vtoc()?;
        self.read_dir()?;
        self.scanned = true;
        Ok(())
    }

    /// Locate the five sectors of one track by scanning for marks.
    /// Returns `(data offset within track, stored length)` indexed by
    /// logical sector id.
    fn scan_track(trk: &[u8],track: usize) -> Result<[(usize,usize);SECTORS_PER_TRACK],DYNERR> {
        let mut ans = [(0,0);SECTORS_PER_TRACK];
        let mut located = [false;SECTORS_PER_TRACK];
        let mut found = 0;
        let mut pos = 0;
        while pos < TRACK_LEN && found < SECTORS_PER_TRACK {
            // sync run, then the address mark
            while pos < TRACK_LEN && trk[pos] != SYNC_BYTE {
                pos += 1;
            }
            while pos+1 < TRACK_LEN && trk[pos..pos+2] != ADDR_MARK {
                pos += 1;
            }
            pos += 2;
            if pos+2 > TRACK_LEN {
                debug!("track {}: truncated address field",track);
                return Err(Box::new(Error::BadDiskFormat));
            }
            let track_id = trk[pos] as usize;
            let sector_id = trk[pos+1] as usize;
            pos += 2;
            if track_id != track || sector_id >= SECTORS_PER_TRACK {
                debug!("track {}: stray address field ({},{})",track,track_id,sector_id);
                return Err(Box::new(Error::BadDiskFormat));
            }
            // sync run again, then the data mark
            while pos < TRACK_LEN && trk[pos] != SYNC_BYTE {
                pos += 1;
            }
            while pos+1 < TRACK_LEN && trk[pos..pos+2] != DATA_MARK {
                pos += 1;
            }
            pos += 2;
            if pos+3+SECTOR_LEN+2 > TRACK_LEN {
                debug!("track {}: truncated sector {}",track,sector_id);
                return Err(Box::new(Error::BadDiskFormat));
            }
            let len = u16::from_le_bytes([trk[pos],trk[pos+1]]) as usize;
            // length prefix is followed by one pad byte
            pos += 3;
            if len > SECTOR_LEN {
                debug!("track {}: sector {} has bad length {}",track,sector_id,len);
                return Err(Box::new(Error::BadDiskFormat));
            }
            ans[sector_id] = (pos,len);
            located[sector_id] = true;
            found += 1;
            pos += 530;
        }
        if located.iter().any(|x| !*x) {
            debug!("track {}: missing sectors",track);
            return Err(Box::new(Error::BadDiskFormat));
        }
        Ok(ans)
    }
    /// Scan every track and rebuild the sector directory.
    fn read_sectors(&mut self) -> STDRESULT {
        if self.img.size() != IMAGE_SIZE {
            debug!("image size {} does not match the RKDOS geometry",self.img.size());
            return Err(Box::new(Error::BadDiskFormat));
        }
        for track in 0..TRACKS {
            let trk_off = track*TRACK_LEN;
            let descs = Self::scan_track(&self.img.data()[trk_off..trk_off+TRACK_LEN],track)?;
            for sector in 0..SECTORS_PER_TRACK {
                let (rel,len) = descs[sector];
                self.sectors[Self::idx(track,sector)] = SectorDesc {
                    offset: trk_off + rel,
                    len,
                    dirty: false,
                    allocated: false
                };
            }
        }
        Ok(())
    }

    /// Unpack the VTOC bitmap into the sector descriptors and count free
    /// sectors.  Byte `t` of the VTOC carries the 5-bit mask of track `t`.
    fn read_vtoc(&mut self) -> STDRESULT {
        let vtoc = self.sectors[Self::idx(VTOC_TRACK,0)].offset;
        let dat = self.img.data();
        if dat[vtoc + VTOC_TRACK] & 0x03 != 0x03 {
            return Err(Box::new(Error::NoFilesystem));
        }
        let masks: Vec<u8> = dat[vtoc..vtoc+TRACKS].to_vec();
        let mut allocated = 0;
        for track in 0..TRACKS {
            for sector in 0..SECTORS_PER_TRACK {
                let used = masks[track] >> sector & 1 > 0;
                self.sectors[Self::idx(track,sector)].allocated = used;
                allocated += used as usize;
            }
        }
        self.free_sectors = TOTAL_SECTORS - allocated;
        Ok(())
    }

    /// Walk the directory chain rebuilding the file list, then compute sizes.
    fn read_dir(&mut self) -> STDRESULT {
        self.files.clear();
        let (mut track,mut sector) = (VTOC_TRACK,1);
        let mut dir_sectors = 0;
        let mut used = 0;
        for _rep in 0..MAX_DIRECTORY_REPS {
            let base = self.sectors[Self::idx(track,sector)].offset;
            dir_sectors += 1;
            for slot in 0..DIR_ENTRIES_PER_SECTOR {
                let off = base + DIR_ENTRY_OFFSET + slot*DIR_ENTRY_LEN;
                match self.img.data()[off] {
                    0 => break,
                    0xFF => continue,
                    _ => {}
                }
                let entry = Entry::parse(&self.img.data()[off..off+DIR_ENTRY_LEN]);
                self.files.push(FileInfo {
                    name: entry.file_name(),
                    dir_track: track as u8,
                    dir_sector: sector as u8,
                    dir_offset: DIR_ENTRY_OFFSET + slot*DIR_ENTRY_LEN,
                    tslist_track: entry.tslist_track,
                    tslist_sector: entry.tslist_sector,
                    load_addr: entry.load_addr,
                    sector_count: entry.sector_count,
                    attr: entry.attr,
                    size: 0
                });
                used += 1;
            }
            let next_track = self.img.data()[base] as usize;
            let next_sector = self.img.data()[base+1] as usize;
            if next_track == 0 && next_sector == 0 {
                self.free_dir_entries = dir_sectors*DIR_ENTRIES_PER_SECTOR - used;
                self.files.sort_by(|a,b| a.name.cmp(&b.name));
                return self.calc_sizes();
            }
            Self::check_ts(next_track,next_sector)?;
            (track,sector) = (next_track,next_sector);
        }
        debug!("directory chain exceeded {} sectors",MAX_DIRECTORY_REPS);
        Err(Box::new(Error::BadDiskFormat))
    }
    fn calc_sizes(&mut self) -> STDRESULT {
        for i in 0..self.files.len() {
            let t = self.files[i].tslist_track as usize;
            let s = self.files[i].tslist_sector as usize;
            self.files[i].size = self.chain_size(t,s)?;
        }
        Ok(())
    }
    /// Sum the stored lengths of all data sectors referenced from a T/S-list
    /// chain.
    fn chain_size(&self,t0: usize,s0: usize) -> Result<usize,DYNERR> {
        let (mut track,mut sector) = (t0,s0);
        Self::check_ts(track,sector)?;
        let mut len = 0;
        for _rep in 0..MAX_TSLIST_REPS {
            let desc = self.sectors[Self::idx(track,sector)];
            let dat = self.img.data();
            let next_track = dat[desc.offset] as usize;
            let next_sector = dat[desc.offset+1] as usize;
            let mut pos = 2;
            while pos+2 <= desc.len {
                let dt = dat[desc.offset+pos] as usize;
                let ds = dat[desc.offset+pos+1] as usize;
                pos += 2;
                if dt == 0 && ds == 0 {
                    break;
                }
                Self::check_ts(dt,ds)?;
                len += self.sectors[Self::idx(dt,ds)].len;
            }
            if next_track == 0 && next_sector == 0 {
                return Ok(len);
            }
            Self::check_ts(next_track,next_sector)?;
            (track,sector) = (next_track,next_sector);
        }
        debug!("track sector list chain exceeded {} sectors",MAX_TSLIST_REPS);
        Err(Box::new(Error::BadDiskFormat))
    }

    /// Sorted list of files with computed sizes.
    pub fn file_list(&mut self) -> Result<Vec<FileInfo>,DYNERR> {
        self.read_disk()?;
        Ok(self.files.clone())
    }
    /// Look up one file by name, case-insensitively.
    pub fn file_info(&mut self,name: &str) -> Result<FileInfo,DYNERR> {
        self.read_disk()?;
        let fname = normalize_name(name);
        match self.files.iter().find(|f| f.name == fname) {
            Some(fi) => Ok(fi.clone()),
            None => Err(Box::new(Error::FileNotFound))
        }
    }
    pub fn free_blocks(&mut self) -> Result<usize,DYNERR> {
        self.read_disk()?;
        Ok(self.free_sectors)
    }
    pub fn free_dir_entries(&mut self) -> Result<usize,DYNERR> {
        self.read_disk()?;
        Ok(self.free_dir_entries)
    }

    /// Zero a sector's data, mark it allocated and dirty, set its VTOC bit.
    fn allocate_specific(&mut self,track: usize,sector: usize) {
        if !self.sectors[Self::idx(track,sector)].allocated {
            self.free_sectors -= 1;
        }
        let offset = self.sectors[Self::idx(track,sector)].offset;
        let vtoc = self.sectors[Self::idx(VTOC_TRACK,0)].offset;
        let dat = self.img.data_mut();
        dat[offset..offset+SECTOR_LEN].fill(0);
        dat[vtoc + track] |= 1 << sector;
        self.sectors[Self::idx(track,sector)].dirty = true;
        self.sectors[Self::idx(track,sector)].allocated = true;
        self.sectors[Self::idx(VTOC_TRACK,0)].dirty = true;
    }
    /// First-fit allocation in track-major order.
    fn allocate_sector(&mut self) -> Result<(usize,usize),DYNERR> {
        if self.free_sectors == 0 {
            return Err(Box::new(Error::DiskFull));
        }
        for track in 0..TRACKS {
            for sector in 0..SECTORS_PER_TRACK {
                if !self.sectors[Self::idx(track,sector)].allocated {
                    self.allocate_specific(track,sector);
                    return Ok((track,sector));
                }
            }
        }
        Err(Box::new(Error::DiskFull))
    }
    /// Release a sector.  Idempotent.
    fn free_sector(&mut self,track: usize,sector: usize) {
        if !self.sectors[Self::idx(track,sector)].allocated {
            return;
        }
        let vtoc = self.sectors[Self::idx(VTOC_TRACK,0)].offset;
        self.img.data_mut()[vtoc + track] &= !(1 << sector);
        self.sectors[Self::idx(track,sector)].allocated = false;
        self.sectors[Self::idx(track,sector)].dirty = true;
        self.sectors[Self::idx(VTOC_TRACK,0)].dirty = true;
        self.free_sectors += 1;
    }
    /// Find the first open directory slot.  Returns `(track,sector,offset
    /// within the sector data)`.
    fn allocate_dir_entry(&mut self) -> Result<(usize,usize,usize),DYNERR> {
        let (mut track,mut sector) = (VTOC_TRACK,1);
        for _rep in 0..MAX_DIRECTORY_REPS {
            let base = self.sectors[Self::idx(track,sector)].offset;
            for slot in 0..DIR_ENTRIES_PER_SECTOR {
                let off = DIR_ENTRY_OFFSET + slot*DIR_ENTRY_LEN;
                let first = self.img.data()[base+off];
                if first == 0 || first == 0xFF {
                    self.sectors[Self::idx(track,sector)].dirty = true;
                    return Ok((track,sector,off));
                }
            }
            let next_track = self.img.data()[base] as usize;
            let next_sector = self.img.data()[base+1] as usize;
            if next_track == 0 && next_sector == 0 {
                return Err(Box::new(Error::DirFull));
            }
            Self::check_ts(next_track,next_sector)?;
            (track,sector) = (next_track,next_sector);
        }
        debug!("directory chain exceeded {} sectors",MAX_DIRECTORY_REPS);
        Err(Box::new(Error::BadDiskFormat))
    }

    /// Read back a file's contents by walking its T/S-list chain.
    pub fn read_file(&mut self,name: &str) -> Result<Vec<u8>,DYNERR> {
        let fi = self.file_info(name)?;
        let mut remaining = fi.size;
        let mut ans: Vec<u8> = Vec::with_capacity(remaining);
        let (mut track,mut sector) = (fi.tslist_track as usize,fi.tslist_sector as usize);
        Self::check_ts(track,sector)?;
        for _rep in 0..MAX_TSLIST_REPS {
            let desc = self.sectors[Self::idx(track,sector)];
            let dat = self.img.data();
            let next_track = dat[desc.offset] as usize;
            let next_sector = dat[desc.offset+1] as usize;
            let mut pos = 2;
            while pos+2 <= desc.len {
                let dt = dat[desc.offset+pos] as usize;
                let ds = dat[desc.offset+pos+1] as usize;
                pos += 2;
                if dt == 0 && ds == 0 {
                    break;
                }
                Self::check_ts(dt,ds)?;
                let data_desc = self.sectors[Self::idx(dt,ds)];
                let count = usize::min(data_desc.len,remaining);
                ans.extend_from_slice(&dat[data_desc.offset..data_desc.offset+count]);
                remaining -= count;
            }
            if next_track == 0 && next_sector == 0 {
                return Ok(ans);
            }
            Self::check_ts(next_track,next_sector)?;
            (track,sector) = (next_track,next_sector);
        }
        debug!("track sector list chain exceeded {} sectors",MAX_TSLIST_REPS);
        Err(Box::new(Error::BadDiskFormat))
    }

    /// Write a file.  A directory entry, one T/S-list chain, and enough data
    /// sectors are allocated, or nothing is touched at all.  An existing file
    /// of the same name is an error unless `allow_overwrite` is set, in which
    /// case it is deleted first.
    pub fn write_file(&mut self,name: &str,data: &[u8],load_addr: u16,attr: u8,allow_overwrite: bool) -> STDRESULT {
        self.read_disk()?;
        let fname = normalize_name(name);
        if self.files.iter().any(|f| f.name == fname) {
            if !allow_overwrite {
                return Err(Box::new(Error::FileExists));
            }
            self.delete_file(&fname)?;
        }
        // a zero length file still gets one data sector
        let data_sectors = usize::max(1,(data.len() + SECTOR_LEN - 1)/SECTOR_LEN);
        let tslist_sectors = (data_sectors + 125)/126;
        let total = data_sectors + tslist_sectors;
        if total > self.free_sectors {
            return Err(Box::new(Error::DiskFull));
        }

        let (dir_track,dir_sector,dir_off) = self.allocate_dir_entry()?;
        let (list_track,list_sector) = self.allocate_sector()?;
        // a reused sector may carry a stale short length from a prior life as
        // file data, but a list sector is always walked out to 512 bytes
        self.sectors[Self::idx(list_track,list_sector)].len = SECTOR_LEN;
        let entry = Entry::new(&fname,list_track as u8,list_sector as u8,load_addr,total as u16,attr);
        let base = self.sectors[Self::idx(dir_track,dir_sector)].offset;
        entry.store(&mut self.img.data_mut()[base+dir_off..base+dir_off+DIR_ENTRY_LEN]);

        // lay down the data, growing the T/S-list as we go
        let (mut lt,mut ls) = (list_track,list_sector);
        let mut lpos = 2;
        let mut written = 0;
        loop {
            let (dt,ds) = self.allocate_sector()?;
            let count = usize::min(SECTOR_LEN,data.len() - written);
            let offset = self.sectors[Self::idx(dt,ds)].offset;
            let dat = self.img.data_mut();
            dat[offset..offset+count].copy_from_slice(&data[written..written+count]);
            if count < SECTOR_LEN {
                dat[offset+count..offset+SECTOR_LEN+2].fill(0);
            }
            self.sectors[Self::idx(dt,ds)].len = count;
            written += count;
            let list_off = self.sectors[Self::idx(lt,ls)].offset;
            let dat = self.img.data_mut();
            dat[list_off+lpos] = dt as u8;
            dat[list_off+lpos+1] = ds as u8;
            lpos += 2;
            if written >= data.len() {
                break;
            }
            if lpos == TSLIST_PAIR_LIMIT {
                // pair area full with more to come: chain in a fresh list sector
                let (nt,ns) = self.allocate_sector()?;
                self.sectors[Self::idx(nt,ns)].len = SECTOR_LEN;
                let list_off = self.sectors[Self::idx(lt,ls)].offset;
                let dat = self.img.data_mut();
                dat[list_off+TSLIST_PAIR_LIMIT] = 0;
                dat[list_off+TSLIST_PAIR_LIMIT+1] = 0;
                dat[list_off] = nt as u8;
                dat[list_off+1] = ns as u8;
                (lt,ls) = (nt,ns);
                lpos = 2;
            }
        }
        let list_off = self.sectors[Self::idx(lt,ls)].offset;
        let dat = self.img.data_mut();
        dat[list_off+lpos] = 0;
        dat[list_off+lpos+1] = 0;

        self.update_sectors();
        self.read_dir()
    }

    /// Delete a file: mark the directory entry and free the whole chain.
    pub fn delete_file(&mut self,name: &str) -> STDRESULT {
        let fi = self.file_info(name)?;
        let dir_idx = Self::idx(fi.dir_track as usize,fi.dir_sector as usize);
        let base = self.sectors[dir_idx].offset;
        directory::mark_deleted(&mut self.img.data_mut()[base+fi.dir_offset..base+fi.dir_offset+DIR_ENTRY_LEN]);
        self.sectors[dir_idx].dirty = true;

        let (mut track,mut sector) = (fi.tslist_track as usize,fi.tslist_sector as usize);
        Self::check_ts(track,sector)?;
        let mut reps = 0;
        loop {
            reps += 1;
            if reps > MAX_TSLIST_REPS {
                debug!("track sector list chain exceeded {} sectors",MAX_TSLIST_REPS);
                return Err(Box::new(Error::BadDiskFormat));
            }
            let desc = self.sectors[Self::idx(track,sector)];
            let dat = self.img.data();
            let next_track = dat[desc.offset] as usize;
            let next_sector = dat[desc.offset+1] as usize;
            let mut pairs: Vec<(usize,usize)> = Vec::new();
            let mut pos = 2;
            while pos+2 <= desc.len {
                let dt = dat[desc.offset+pos] as usize;
                let ds = dat[desc.offset+pos+1] as usize;
                pos += 2;
                if dt == 0 && ds == 0 {
                    break;
                }
                Self::check_ts(dt,ds)?;
                pairs.push((dt,ds));
            }
            for (dt,ds) in pairs {
                self.free_sector(dt,ds);
            }
            self.free_sector(track,sector);
            if next_track == 0 && next_sector == 0 {
                break;
            }
            Self::check_ts(next_track,next_sector)?;
            (track,sector) = (next_track,next_sector);
        }
        self.update_sectors();
        self.read_dir()
    }

    /// Overwrite the attribute byte of a file's directory entry.
    pub fn set_attributes(&mut self,name: &str,attr: u8) -> STDRESULT {
        let fi = self.file_info(name)?;
        let dir_idx = Self::idx(fi.dir_track as usize,fi.dir_sector as usize);
        let base = self.sectors[dir_idx].offset;
        self.img.data_mut()[base + fi.dir_offset + 20] = attr;
        self.sectors[dir_idx].dirty = true;
        if let Some(f) = self.files.iter_mut().find(|f| f.name == fi.name) {
            f.attr = attr;
        }
        self.update_sectors();
        Ok(())
    }

    /// Lay down fresh framing on every track and install an empty file
    /// system with `directory_size` directory sectors.
    pub fn format(&mut self,directory_size: usize) -> STDRESULT {
        debug_assert!((1..=99).contains(&directory_size));
        if self.img.size() != IMAGE_SIZE {
            return Err(Box::new(Error::BadDiskFormat));
        }
        for track in 0..TRACKS {
            let trk = &mut self.img.data_mut()[track*TRACK_LEN..(track+1)*TRACK_LEN];
            trk[..SLOT_LEN*SECTORS_PER_TRACK].fill(0);
            trk[SLOT_LEN*SECTORS_PER_TRACK..].fill(0xFF);
            for slot in 0..SECTORS_PER_TRACK {
                let p = slot*SLOT_LEN;
                let sector = INTERLEAVE[slot];
                trk[p..p+5].fill(SYNC_BYTE);
                trk[p+10] = ADDR_MARK[0];
                trk[p+11] = ADDR_MARK[1];
                trk[p+12] = track as u8;
                trk[p+13] = sector;
                trk[p+14] = (track as u8).wrapping_add(sector);
                trk[p+20..p+25].fill(SYNC_BYTE);
                trk[p+30] = DATA_MARK[0];
                trk[p+31] = DATA_MARK[1];
                if track == VTOC_TRACK && sector == 0 {
                    trk[p+32] = VTOC_LEN as u8;
                    trk[p+34+0x20] = 0x1F;
                    trk[p+34+0xA0] = 0x1F;
                } else {
                    trk[p+33] = (SECTOR_LEN >> 8) as u8;
                }
            }
        }
        self.read_sectors()?;
        self.free_sectors = TOTAL_SECTORS;
        self.allocate_specific(VTOC_TRACK,0);
        self.sectors[Self::idx(VTOC_TRACK,0)].len = VTOC_LEN;
        for i in 1..=directory_size {
            let track = VTOC_TRACK + i/SECTORS_PER_TRACK;
            let sector = i%SECTORS_PER_TRACK;
            self.allocate_specific(track,sector);
            if i != directory_size {
                let offset = self.sectors[Self::idx(track,sector)].offset;
                let dat = self.img.data_mut();
                dat[offset] = (VTOC_TRACK + (i+1)/SECTORS_PER_TRACK) as u8;
                dat[offset+1] = ((i+1)%SECTORS_PER_TRACK) as u8;
            }
        }
        self.update_sectors();
        info!("formatted with {} directory sector(s)",directory_size);
        // cached state is rebuilt on the next query
        self.files.clear();
        self.scanned = false;
        Ok(())
    }

    /// Rewrite the length prefix and checksum of every dirty sector.
    fn update_sectors(&mut self) {
        for i in 0..TOTAL_SECTORS {
            if !self.sectors[i].dirty {
                continue;
            }
            let desc = self.sectors[i];
            let dat = self.img.data_mut();
            dat[desc.offset-3] = (desc.len & 0xFF) as u8;
            dat[desc.offset-2] = (desc.len >> 8) as u8;
            let mut cs: u16 = 0;
            for j in 0..desc.len {
                cs = cs.wrapping_add(dat[desc.offset+j] as u16);
            }
            dat[desc.offset+desc.len] = (cs & 0xFF) as u8;
            dat[desc.offset+desc.len+1] = (cs >> 8) as u8;
            self.sectors[i].dirty = false;
        }
    }

    /// Make all changes permanent.
    pub fn save(&mut self) -> STDRESULT {
        self.img.flush()?;
        Ok(())
    }
    /// Mutably borrow the underlying image.
    pub fn get_img(&mut self) -> &mut ImageFile {
        &mut self.img
    }
}
