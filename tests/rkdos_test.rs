// test of the rkdos file system module
use rkkit::fs::rkdos::Disk;
use rkkit::img::OpenMode;

const IMAGE_SIZE: usize = 500000;
const TRACK_LEN: usize = 3125;
const SLOT_LEN: usize = 586;

fn tmp_path(dir: &tempfile::TempDir,name: &str) -> String {
    dir.path().join(name).to_string_lossy().to_string()
}

fn fresh_disk(dir: &tempfile::TempDir,name: &str) -> Disk {
    let mut disk = Disk::open(&tmp_path(dir,name),OpenMode::Create).expect("could not create image");
    disk.format(4).expect("failed to format");
    disk
}

/// Independently locate a sector's data by walking the framing bytes the
/// formatter is supposed to have laid down.
fn data_offset(dat: &[u8],track: usize,sector: usize) -> usize {
    for slot in 0..5 {
        let p = track*TRACK_LEN + slot*SLOT_LEN;
        assert_eq!(dat[p..p+5],[0x06;5],"sync run missing at track {}",track);
        assert_eq!(dat[p+10..p+12],[0xEA,0xD3],"address mark missing at track {}",track);
        if dat[p+12] as usize == track && dat[p+13] as usize == sector {
            assert_eq!(dat[p+14],(track as u8).wrapping_add(sector as u8),"address checksum wrong");
            assert_eq!(dat[p+30..p+32],[0xDD,0xF3],"data mark missing at track {}",track);
            return p+35;
        }
    }
    panic!("sector {},{} not found",track,sector);
}

/// Verify the §8 invariants on raw image bytes: framing in place, every
/// length at most 512, every checksum the 16-bit sum of the stored data.
fn check_all_checksums(dat: &[u8]) {
    assert_eq!(dat.len(),IMAGE_SIZE);
    for track in 0..160 {
        for sector in 0..5 {
            let off = data_offset(dat,track,sector);
            let len = u16::from_le_bytes([dat[off-3],dat[off-2]]) as usize;
            assert!(len <= 512,"bad length at track {} sector {}",track,sector);
            let mut cs: u16 = 0;
            for i in 0..len {
                cs = cs.wrapping_add(dat[off+i] as u16);
            }
            assert_eq!(u16::from_le_bytes([dat[off+len],dat[off+len+1]]),cs,
                "bad checksum at track {} sector {}",track,sector);
        }
    }
}

#[test]
fn format_yields_empty_listing() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = fresh_disk(&dir,"blank.rdi");
    assert_eq!(disk.get_img().size(),IMAGE_SIZE);
    assert_eq!(disk.file_list().expect("list failed").len(),0);
    assert_eq!(disk.free_blocks().expect("free failed"),795);
    assert_eq!(disk.free_dir_entries().expect("free dir failed"),92);

    let dat = disk.get_img().data().to_vec();
    // the VTOC backs itself and four directory sectors on track 32
    let vtoc = data_offset(&dat,32,0);
    assert_eq!(dat[vtoc+32] & 0x1F,0x1F);
    assert_eq!(dat[vtoc],0); // track 0 untouched
    // directory sectors are chained and terminated
    for s in 1..4 {
        let off = data_offset(&dat,32,s);
        assert_eq!(dat[off] as usize,32);
        assert_eq!(dat[off+1] as usize,s+1);
    }
    let last = data_offset(&dat,32,4);
    assert_eq!(dat[last..last+2],[0,0]);
    check_all_checksums(&dat);
}

#[test]
fn write_and_read_small_file() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = fresh_disk(&dir,"small.rdi");
    disk.write_file("TEST.BIN",&[0x11,0x22,0x33,0x44],0x1000,0x80,false).expect("write failed");

    let files = disk.file_list().expect("list failed");
    assert_eq!(files.len(),1);
    assert_eq!(files[0].name,"TEST.BIN");
    assert_eq!(files[0].load_addr,0x1000);
    assert_eq!(files[0].sector_count,2);
    assert_eq!(files[0].size,4);
    assert!(files[0].read_only());
    assert!(!files[0].hidden());
    assert_eq!(disk.free_blocks().expect("free failed"),793);

    // lookups are case-insensitive
    assert_eq!(disk.read_file("test.bin").expect("read failed"),vec![0x11,0x22,0x33,0x44]);
}

#[test]
fn big_file_spans_three_lists() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = fresh_disk(&dir,"big.rdi");
    let mut big: Vec<u8> = vec![0;130560]; // 255 full sectors
    for i in 0..big.len() {
        big[i] = (i%256) as u8;
    }
    disk.write_file("BIG.DAT",&big,0,0,false).expect("write failed");
    let fi = disk.file_info("big.dat").expect("lookup failed");
    assert_eq!(fi.sector_count,258); // 255 data + 3 list sectors
    assert_eq!(fi.size,130560);
    assert_eq!(disk.free_blocks().expect("free failed"),795-258);
    assert_eq!(disk.read_file("BIG.DAT").expect("read failed"),big);
}

#[test]
fn exactly_126_data_sectors_need_one_list() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = fresh_disk(&dir,"fit.rdi");
    let dat = vec![0x5A;126*512];
    disk.write_file("FIT.DAT",&dat,0,0,false).expect("write failed");
    assert_eq!(disk.file_info("fit.dat").expect("lookup failed").sector_count,127);
    assert_eq!(disk.free_blocks().expect("free failed"),795-127);
    assert_eq!(disk.read_file("fit.dat").expect("read failed"),dat);

    let dat = vec![0xA5;127*512];
    disk.write_file("SPILL.DAT",&dat,0,0,false).expect("write failed");
    assert_eq!(disk.file_info("spill.dat").expect("lookup failed").sector_count,129);
    assert_eq!(disk.read_file("spill.dat").expect("read failed"),dat);
}

#[test]
fn delete_restores_and_first_fit_reuses() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = fresh_disk(&dir,"reuse.rdi");
    disk.write_file("TEST.BIN",&[0x11,0x22,0x33,0x44],0x1000,0,false).expect("write failed");
    assert_eq!(disk.free_blocks().expect("free failed"),793);

    disk.delete_file("test.bin").expect("delete failed");
    assert_eq!(disk.free_blocks().expect("free failed"),795);
    assert!(disk.file_list().expect("list failed").is_empty());

    // the freed sectors are the lowest numbered ones, first-fit takes them back
    disk.write_file("TEST2.BIN",&vec![0xEE;512],0,0,false).expect("write failed");
    let fi = disk.file_info("TEST2.BIN").expect("lookup failed");
    assert_eq!((fi.tslist_track,fi.tslist_sector),(0,0));
    assert_eq!(disk.free_blocks().expect("free failed"),793);
}

#[test]
fn zero_byte_file_still_takes_two_sectors() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = fresh_disk(&dir,"empty.rdi");
    disk.write_file("NIL",&[],0,0,false).expect("write failed");
    let fi = disk.file_info("nil").expect("lookup failed");
    assert_eq!(fi.sector_count,2);
    assert_eq!(fi.size,0);
    assert_eq!(disk.free_blocks().expect("free failed"),793);
    assert_eq!(disk.read_file("nil").expect("read failed"),Vec::<u8>::new());
    disk.delete_file("NIL").expect("delete failed");
    assert_eq!(disk.free_blocks().expect("free failed"),795);
}

#[test]
fn name_collisions_respect_the_overwrite_flag() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = fresh_disk(&dir,"clash.rdi");
    disk.write_file("prog.rk",&[1,2,3],0,0,false).expect("write failed");
    match disk.write_file("PROG.RK",&[9,9],0,0,false) {
        Ok(()) => panic!("colliding write should have failed"),
        Err(e) => assert_eq!(e.to_string(),"file already exists")
    }
    disk.write_file("PROG.RK",&[9,9],0,0,true).expect("overwrite failed");
    assert_eq!(disk.read_file("prog.rk").expect("read failed"),vec![9,9]);
    assert_eq!(disk.file_list().expect("list failed").len(),1);
    assert_eq!(disk.free_blocks().expect("free failed"),793);
}

#[test]
fn out_of_space() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = fresh_disk(&dir,"full.rdi");
    let big = vec![0;795*512]; // needs 795 data + 7 list sectors
    match disk.write_file("TOOBIG",&big,0,0,false) {
        Ok(()) => panic!("write should have failed"),
        Err(e) => assert_eq!(e.to_string(),"insufficient disk space")
    }
    // nothing was touched
    assert_eq!(disk.free_blocks().expect("free failed"),795);
    assert!(disk.file_list().expect("list failed").is_empty());
}

#[test]
fn single_directory_sector_fills_after_23_files() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = Disk::open(&tmp_path(&dir,"dirfull.rdi"),OpenMode::Create).expect("could not create image");
    disk.format(1).expect("failed to format");
    assert_eq!(disk.free_dir_entries().expect("free dir failed"),23);
    for i in 0..23u8 {
        disk.write_file(&format!("F{:02}",i),&[i],0,0,false).expect("write failed");
    }
    assert_eq!(disk.free_dir_entries().expect("free dir failed"),0);
    match disk.write_file("ONEMORE",&[0],0,0,false) {
        Ok(()) => panic!("24th entry should not fit"),
        Err(e) => assert_eq!(e.to_string(),"no more dir entries")
    }
}

#[test]
fn attributes_show_in_listing() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = fresh_disk(&dir,"attr.rdi");
    disk.write_file("A.BIN",&[0],0,0,false).expect("write failed");
    disk.set_attributes("a.bin",0xC0).expect("attr failed");
    let fi = disk.file_info("A.BIN").expect("lookup failed");
    assert!(fi.read_only() && fi.hidden());
    disk.set_attributes("a.bin",0).expect("attr failed");
    let fi = disk.file_info("A.BIN").expect("lookup failed");
    assert!(!fi.read_only() && !fi.hidden());
}

#[test]
fn listing_is_sorted() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = fresh_disk(&dir,"sort.rdi");
    disk.write_file("ZEBRA",&[1],0,0,false).expect("write failed");
    disk.write_file("apple",&[2],0,0,false).expect("write failed");
    disk.write_file("MANGO",&[3],0,0,false).expect("write failed");
    let names: Vec<String> = disk.file_list().expect("list failed").iter().map(|f| f.name.clone()).collect();
    assert_eq!(names,vec!["APPLE","MANGO","ZEBRA"]);
}

#[test]
fn save_reopen_round_trip() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let path = tmp_path(&dir,"persist.rdi");
    let mut disk = Disk::open(&path,OpenMode::Create).expect("could not create image");
    disk.format(4).expect("failed to format");
    let payload: Vec<u8> = (0..2000).map(|i| (i%251) as u8).collect();
    disk.write_file("KEEP.DAT",&payload,0x0100,0x40,false).expect("write failed");
    disk.write_file("OTHER.DAT",&[7;700],0,0,false).expect("write failed");
    disk.save().expect("save failed");

    // the persisted image holds the invariants on its own
    let raw = std::fs::read(&path).expect("could not read back image");
    check_all_checksums(&raw);

    let mut disk = Disk::open(&path,OpenMode::ReadWrite).expect("could not reopen");
    assert_eq!(disk.file_list().expect("list failed").len(),2);
    let fi = disk.file_info("keep.dat").expect("lookup failed");
    assert_eq!(fi.load_addr,0x0100);
    assert!(fi.hidden());
    assert_eq!(disk.read_file("keep.dat").expect("read failed"),payload);

    disk.delete_file("other.dat").expect("delete failed");
    disk.save().expect("save failed");
    let mut disk = Disk::open(&path,OpenMode::ReadOnly).expect("could not reopen");
    assert_eq!(disk.file_list().expect("list failed").len(),1);
    check_all_checksums(&std::fs::read(&path).expect("could not read back image"));
}

#[test]
fn unformatted_image_is_rejected() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = Disk::open(&tmp_path(&dir,"zeros.rdi"),OpenMode::Create).expect("could not create image");
    match disk.file_list() {
        Ok(_) => panic!("zero image should not parse"),
        Err(e) => assert_eq!(e.to_string(),"bad disk image")
    }
}

#[test]
fn missing_vtoc_signature_is_rejected() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let path = tmp_path(&dir,"nosig.rdi");
    let mut disk = Disk::open(&path,OpenMode::Create).expect("could not create image");
    disk.format(1).expect("failed to format");
    disk.save().expect("save failed");

    let mut raw = std::fs::read(&path).expect("could not read back image");
    let vtoc = data_offset(&raw,32,0);
    raw[vtoc+32] = 0; // clear the self-allocation bits
    std::fs::write(&path,&raw).expect("could not corrupt image");

    let mut disk = Disk::open(&path,OpenMode::ReadOnly).expect("could not reopen");
    match disk.file_list() {
        Ok(_) => panic!("image without filesystem should not list"),
        Err(e) => assert_eq!(e.to_string(),"no filesystem on image")
    }
}

#[test]
fn file_not_found_paths() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let mut disk = fresh_disk(&dir,"missing.rdi");
    match disk.read_file("GHOST") {
        Ok(_) => panic!("read of a missing file should have failed"),
        Err(e) => assert_eq!(e.to_string(),"file not found")
    }
    match disk.delete_file("GHOST") {
        Ok(_) => panic!("delete of a missing file should have failed"),
        Err(e) => assert_eq!(e.to_string(),"file not found")
    }
    match disk.set_attributes("GHOST",0x80) {
        Ok(_) => panic!("attributes of a missing file should have failed"),
        Err(e) => assert_eq!(e.to_string(),"file not found")
    }
}
