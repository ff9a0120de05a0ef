use std::path::Path;
use log::info;
use crate::fs::rkdos;
use crate::img::OpenMode;
use crate::STDRESULT;
use super::{attr_byte,parse_hex_addr,RCH};

/// Add a local file to an image.
pub fn put(cmd: &clap::ArgMatches) -> STDRESULT {
    let file_path = cmd.get_one::<String>("file").expect(RCH);
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let load_addr = match cmd.get_one::<String>("addr") {
        Some(s) => parse_hex_addr(s)?,
        None => 0
    };
    let dat = std::fs::read(file_path)?;
    let name = match cmd.get_one::<String>("name") {
        Some(n) => n.clone(),
        None => Path::new(file_path).file_name().unwrap_or_default().to_string_lossy().to_string()
    };
    let stored = rkdos::types::normalize_name(&name);
    if stored != name {
        info!("storing as {}",stored);
    }
    let attr = attr_byte(cmd.get_flag("readonly"),cmd.get_flag("hidden"));
    let mut disk = rkdos::Disk::open(img_path,OpenMode::ReadWrite)?;
    disk.write_file(&name,&dat,load_addr,attr,cmd.get_flag("overwrite"))?;
    disk.save()
}
