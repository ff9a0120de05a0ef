use crate::fs::rkdos;
use crate::img::OpenMode;
use crate::STDRESULT;
use super::RCH;

/// Extract a file from an image to the local file system.
pub fn get(cmd: &clap::ArgMatches) -> STDRESULT {
    let name = cmd.get_one::<String>("file").expect(RCH);
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let mut disk = rkdos::Disk::open(img_path,OpenMode::ReadOnly)?;
    let dat = disk.read_file(name)?;
    let output = match cmd.get_one::<String>("output") {
        Some(path) => path.clone(),
        None => rkdos::types::normalize_name(name)
    };
    std::fs::write(output,&dat)?;
    Ok(())
}
