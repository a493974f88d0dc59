use clap::{arg, crate_version, Command};
use std::io::Write;

const RCH: &str = "unreachable was reached";

fn ignore_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_IGN);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    ignore_sigpipe();

    let long_help = "Examples:
---------
Compress:      `zblock compress -i my_file -o my_file.zb`
Decompress:    `zblock decompress -i my_file.zb -o my_file`";

    let mut main_cmd = Command::new("zblock")
        .about("Block-parallel LZW/Huffman compression")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(
        Command::new("compress")
            .arg(arg!(-i --input <PATH> "input path").required(true))
            .arg(arg!(-o --output <PATH> "output path").required(true))
            .arg(
                arg!(-w --workers <N> "maximum concurrent block workers")
                    .required(false)
                    .value_parser(clap::value_parser!(usize)),
            )
            .about("compress a file"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("decompress")
            .arg(arg!(-i --input <PATH> "input path").required(true))
            .arg(arg!(-o --output <PATH> "output path").required(true))
            .arg(
                arg!(-w --workers <N> "maximum concurrent block workers")
                    .required(false)
                    .value_parser(clap::value_parser!(usize)),
            )
            .about("decompress a file"),
    );

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let opts = options_from(cmd);

        let file_in = std::fs::File::open(path_in)?;
        let mapped = unsafe { memmap2::Mmap::map(&file_in)? };
        let mut file_out = std::fs::File::create(path_out)?;

        log::info!("compressing {} bytes from {}", mapped.len(), path_in);
        zblock::compress(&mapped, &mut file_out, &opts)?;
        file_out.flush()?;
    }

    if let Some(cmd) = matches.subcommand_matches("decompress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let opts = options_from(cmd);

        let file_in = std::fs::File::open(path_in)?;
        let mapped = unsafe { memmap2::Mmap::map(&file_in)? };
        let mut file_out = std::fs::File::create(path_out)?;

        log::info!("decompressing {} bytes from {}", mapped.len(), path_in);
        zblock::decompress(&mapped, &mut file_out, &opts)?;
        file_out.flush()?;
    }

    Ok(())
}

fn options_from(cmd: &clap::ArgMatches) -> zblock::Options {
    let mut opts = zblock::Options::default();
    if let Some(&w) = cmd.get_one::<usize>("workers") {
        opts.workers = w.max(1);
    }
    opts
}
