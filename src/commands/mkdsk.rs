use std::io::Write;
use crate::fs::rkdos;
use crate::img::OpenMode;
use crate::STDRESULT;
use super::{CommandError,RCH};

/// Create or re-format an image with a blank file system.
pub fn mkdsk(cmd: &clap::ArgMatches) -> STDRESULT {
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let dir_size = *cmd.get_one::<u64>("size").expect(RCH) as usize;
    if !cmd.get_flag("yes") && atty::is(atty::Stream::Stdin) {
        print!("format image {}? [y/N] ",img_path);
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !answer.trim_start().starts_with(['y','Y']) {
            return Err(Box::new(CommandError::Cancelled));
        }
    }
    let mut disk = rkdos::Disk::open(img_path,OpenMode::Create)?;
    disk.format(dir_size)?;
    disk.save()?;
    println!("formatted image {}, {} sector(s) directory",img_path,dir_size);
    Ok(())
}
