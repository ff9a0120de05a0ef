use colored::*;
use crate::fs::rkdos;
use crate::img::OpenMode;
use crate::STDRESULT;
use super::RCH;

/// List the files on an image with totals, mirroring the native directory
/// listing.
pub fn catalog(cmd: &clap::ArgMatches) -> STDRESULT {
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let mut disk = rkdos::Disk::open(img_path,OpenMode::ReadOnly)?;
    let files = disk.file_list()?;
    println!();
    if cmd.get_flag("brief") {
        for (i,fi) in files.iter().enumerate() {
            print!("{:<14}\t",fi.name);
            if (i+1) % 5 == 0 {
                println!();
            }
        }
        println!();
    } else {
        println!("{}",format!("{:<14}  {:>4}  {:>6}  {:>7}  {:>4}","Name","Addr","Blocks","Bytes","Attr").bold());
        for fi in &files {
            let mut attr = String::new();
            if fi.read_only() {
                attr.push('R');
            }
            if fi.hidden() {
                attr.push('H');
            }
            println!("{:<14}  {:04x}  {:>6}  {:>7}  {:>4}",fi.name,fi.load_addr,fi.sector_count,fi.size,attr);
        }
    }
    println!();
    println!("{} file(s) total",files.len());
    let free = disk.free_blocks()?;
    println!();
    println!("{} block(s) ({} bytes) free",free,free*rkdos::types::SECTOR_LEN);
    println!("{} directory entries free",disk.free_dir_entries()?);
    Ok(())
}
