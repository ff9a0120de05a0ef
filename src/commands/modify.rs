use crate::fs::rkdos;
use crate::img::OpenMode;
use crate::STDRESULT;
use super::{attr_byte,RCH};

/// Delete a file from an image.
pub fn delete(cmd: &clap::ArgMatches) -> STDRESULT {
    let name = cmd.get_one::<String>("file").expect(RCH);
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let mut disk = rkdos::Disk::open(img_path,OpenMode::ReadWrite)?;
    disk.delete_file(name)?;
    disk.save()
}

/// Rewrite a file's attribute byte from the flags.
pub fn access(cmd: &clap::ArgMatches) -> STDRESULT {
    let name = cmd.get_one::<String>("file").expect(RCH);
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let attr = attr_byte(cmd.get_flag("readonly"),cmd.get_flag("hidden"));
    let mut disk = rkdos::Disk::open(img_path,OpenMode::ReadWrite)?;
    disk.set_attributes(name,attr)?;
    disk.save()
}
