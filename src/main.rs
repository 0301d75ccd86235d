//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::io::{self, Read, Write};
use std::process;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use huffpress::tools::cli::{hufopts_init, HufOpts, Mode};
use huffpress::{
    compress_bytes, compress_file, decompress, decompress_file, test_file, HuffError, Result,
};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace. Log to stderr so that -c
    // output on stdout stays clean.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Can't start logger: {}", e);
    }

    let opts = hufopts_init();

    if opts.files.is_empty() {
        if let Err(e) = run_stdin(&opts) {
            error!("stdin: {}", e);
            process::exit(1);
        }
        return;
    }

    //----- Figure what we need to do and go do it, file by file
    let mut failed = false;
    for path in &opts.files {
        let result = match opts.op_mode {
            Mode::Zip => compress_file(path, &opts).map(|_| ()),
            Mode::Unzip => decompress_file(path, &opts).map(|_| ()),
            Mode::Test => test_file(path).and_then(|stats| {
                if stats.is_intact() {
                    Ok(())
                } else {
                    Err(HuffError::Damaged(path.display().to_string()))
                }
            }),
        };
        if let Err(e) = result {
            error!("{}: {}", path.display(), e);
            failed = true;
        }
    }

    info!("Done.");
    if failed {
        process::exit(1);
    }
}

/// Filter standard input to standard output.
fn run_stdin(opts: &HufOpts) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match opts.op_mode {
        Mode::Zip => {
            // Compression needs two passes, so take all of stdin first.
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            stdout.write_all(&compress_bytes(&data)?)?;
            stdout.flush()?;
        }
        Mode::Unzip => {
            decompress(io::stdin().lock(), &mut stdout)?;
        }
        Mode::Test => {
            let stats = decompress(io::stdin().lock(), &mut io::sink())?;
            if !stats.is_intact() {
                return Err(HuffError::Damaged("stdin".to_string()));
            }
            info!("stdin: ok");
        }
    }
    Ok(())
}
