use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use gbk_core::{BootRom, FrameBuffer, GameBoy, GameBoyConfig, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: gbk_frame_dump <rom_path> <frames> <out_rgb24_path> [--skip-boot] [--serial]";

struct Args {
    rom: PathBuf,
    frames: u32,
    out: PathBuf,
    skip_boot: bool,
    serial: bool,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut skip_boot = false;
    let mut serial = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--skip-boot" => skip_boot = true,
            "--serial" => serial = true,
            flag if flag.starts_with("--") => bail!("unknown flag '{flag}'\n{USAGE}"),
            _ => positional.push(arg),
        }
    }

    let [rom, frames, out] = <[String; 3]>::try_from(positional)
        .map_err(|_| anyhow::anyhow!("expected three positional arguments\n{USAGE}"))?;
    let frames = frames
        .parse()
        .with_context(|| format!("invalid frame count '{frames}'"))?;

    Ok(Args {
        rom: rom.into(),
        frames,
        out: out.into(),
        skip_boot,
        serial,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("failed to read ROM '{}'", args.rom.display()))?;

    let boot_rom = if args.skip_boot {
        BootRom::Skip
    } else {
        BootRom::Builtin
    };
    let config = GameBoyConfig::builder().boot_rom(boot_rom).build();
    let mut gb = GameBoy::from_rom(rom, FrameBuffer::new(), config)?;

    for frame in 0..args.frames {
        gb.step_frame().with_context(|| {
            format!(
                "emulation stopped in frame {frame} (pc=0x{:04X})",
                gb.cpu().regs.pc
            )
        })?;
    }

    if args.serial {
        println!("{}", String::from_utf8_lossy(gb.serial_output()));
    }

    let frame = gb.renderer().frame();
    std::fs::write(&args.out, frame)
        .with_context(|| format!("failed to write '{}'", args.out.display()))?;

    println!(
        "Wrote {} bytes ({}x{} rgb24) after {} frames to '{}'",
        frame.len(),
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        args.frames,
        args.out.display()
    );
    Ok(())
}
