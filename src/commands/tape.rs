use std::path::Path;
use std::str::FromStr;
use crate::tape::{self,types::TapeFormat};
use crate::STDRESULT;
use super::{parse_hex_addr,RCH};

/// Wrap a raw binary in a tape framing and write the result out.
pub fn wrap(cmd: &clap::ArgMatches) -> STDRESULT {
    let input = cmd.get_one::<String>("file").expect(RCH);
    let tag = cmd.get_one::<String>("type").expect(RCH);
    let format = TapeFormat::from_str(tag)?;
    let body = std::fs::read(input)?;

    let input_path = Path::new(input);
    let basename = input_path.file_name().unwrap_or_default().to_string_lossy().to_string();
    let is_com = match input_path.extension() {
        Some(ext) => ext.eq_ignore_ascii_case("com"),
        None => false
    };
    let load_addr = match cmd.get_one::<String>("addr") {
        Some(s) => parse_hex_addr(s)?,
        None => match is_com {
            true => 0x0100,
            false => 0
        }
    };
    let run_addr = match cmd.get_one::<String>("run") {
        Some(s) => parse_hex_addr(s)?,
        None => load_addr
    };
    let int_name = match cmd.get_flag("no-name") {
        true => String::new(),
        false => match cmd.get_one::<String>("name") {
            Some(n) => n.clone(),
            None => basename.clone()
        }
    };
    let output = match cmd.get_one::<String>("output") {
        Some(path) => path.clone(),
        None => {
            let stem = match basename.rfind('.') {
                Some(pos) => basename[..pos].to_string(),
                None => basename.clone()
            };
            [stem,tag.clone()].join(".")
        }
    };

    let dat = tape::encode(&body,format,load_addr,run_addr,&int_name)?;
    std::fs::write(&output,&dat)?;
    println!("format:       {}",format);
    println!("load address: {:04X}",load_addr);
    println!("end address:  {:04X}",load_addr.wrapping_add(body.len() as u16).wrapping_sub(1));
    if format == TapeFormat::Cas || format == TapeFormat::Lvt {
        println!("run address:  {:04X}",run_addr);
    }
    if format.name_len() > 0 {
        println!("file name:    {}",String::from_utf8_lossy(&tape::internal_name(&int_name,format.name_len())));
    }
    println!("wrote {}",output);
    Ok(())
}
