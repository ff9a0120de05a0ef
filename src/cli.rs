use clap::{arg, crate_version, ArgAction, Command, ValueHint};

pub fn build_cli() -> Command {
    let long_help = "rkkit is always invoked with exactly one of several subcommands.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
create blank image:   `rkkit mkdsk -d games.rdi -s 4 -y`
list an image:        `rkkit catalog -d games.rdi`
add a binary:         `rkkit put -f loderun.bin -d games.rdi -a 0`
extract it again:     `rkkit get -f loderun.bin -d games.rdi`
make a tape file:     `rkkit tape -f loderun.bin -t rkr -a 0`";
    let fmt_tags = [
        "rk", "rkr", "rkp", "rka", "rkm", "rk8", "rku", "rk4", "rkl", "rke",
        "rks", "rko", "bru", "ord", "cas", "lvt",
    ];

    let mut main_cmd = Command::new("rkkit")
        .about("Manipulates tape and disk images for the Radio-86RK family.")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(
        Command::new("mkdsk")
            .arg(
                arg!(-d --dimg <PATH> "disk image path to create")
                    .value_hint(ValueHint::FilePath)
                    .required(true),
            )
            .arg(
                arg!(-s --size <SECTORS> "directory size in sectors")
                    .value_parser(clap::value_parser!(u64).range(1..=99))
                    .default_value("4")
                    .required(false),
            )
            .arg(arg!(-y --yes "don't ask to confirm").action(ArgAction::SetTrue))
            .about("write a blank formatted disk image to the given path"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("catalog")
            .arg(
                arg!(-d --dimg <PATH> "path to disk image itself")
                    .value_hint(ValueHint::FilePath)
                    .required(true),
            )
            .arg(arg!(-b --brief "names only").action(ArgAction::SetTrue))
            .visible_alias("dir")
            .about("list the files in a disk image"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("put")
            .arg(
                arg!(-f --file <PATH> "local file to add")
                    .value_hint(ValueHint::FilePath)
                    .required(true),
            )
            .arg(
                arg!(-d --dimg <PATH> "path to disk image itself")
                    .value_hint(ValueHint::FilePath)
                    .required(true),
            )
            .arg(arg!(-a --addr <HEX> "load address (hex)").required(false))
            .arg(arg!(-n --name <NAME> "name to store, default is based on the local name").required(false))
            .arg(arg!(-o --overwrite "replace an existing file").action(ArgAction::SetTrue))
            .arg(arg!(-r --readonly "set the read-only attribute").action(ArgAction::SetTrue))
            .arg(arg!(--hidden "set the hidden attribute").action(ArgAction::SetTrue))
            .about("add a file to a disk image"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("get")
            .arg(arg!(-f --file <NAME> "file inside the disk image").required(true))
            .arg(
                arg!(-d --dimg <PATH> "path to disk image itself")
                    .value_hint(ValueHint::FilePath)
                    .required(true),
            )
            .arg(
                arg!(-o --output <PATH> "local path to write, default is the stored name")
                    .value_hint(ValueHint::FilePath)
                    .required(false),
            )
            .about("extract a file from a disk image"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("delete")
            .arg(arg!(-f --file <NAME> "file inside the disk image").required(true))
            .arg(
                arg!(-d --dimg <PATH> "path to disk image itself")
                    .value_hint(ValueHint::FilePath)
                    .required(true),
            )
            .visible_alias("del")
            .visible_alias("era")
            .about("delete a file from a disk image"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("access")
            .arg(arg!(-f --file <NAME> "file inside the disk image").required(true))
            .arg(
                arg!(-d --dimg <PATH> "path to disk image itself")
                    .value_hint(ValueHint::FilePath)
                    .required(true),
            )
            .arg(arg!(-r --readonly "set the read-only attribute").action(ArgAction::SetTrue))
            .arg(arg!(--hidden "set the hidden attribute").action(ArgAction::SetTrue))
            .about("rewrite the attributes of a file in a disk image"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("tape")
            .arg(
                arg!(-f --file <PATH> "raw binary to wrap")
                    .value_hint(ValueHint::FilePath)
                    .required(true),
            )
            .arg(
                arg!(-t --type <FORMAT> "tape format")
                    .value_parser(fmt_tags)
                    .default_value("rk")
                    .required(false),
            )
            .arg(arg!(-a --addr <HEX> "load address (hex), default 0 (100 for .com input)").required(false))
            .arg(arg!(-r --run <HEX> "run address for cas and lvt (hex), default is the load address").required(false))
            .arg(arg!(-n --name <NAME> "internal file name, default is based on the input name").required(false))
            .arg(arg!(--"no-name" "no internal file name").action(ArgAction::SetTrue))
            .arg(
                arg!(-o --output <PATH> "output path, default is based on the input name")
                    .value_hint(ValueHint::FilePath)
                    .required(false),
            )
            .about("wrap a raw binary in a tape file framing"),
    );
    main_cmd
}
