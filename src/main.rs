use clap::Parser;
use log::LevelFilter;

use pixel_stego::{
    cli::{Cli, Commands},
    handler::{
        handle_hide_picture, handle_hide_text, handle_outline, handle_reveal_picture,
        handle_reveal_text, handle_simple_color,
    },
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // RUST_LOG 优先于 -v 参数
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::SimpleColor(args) => handle_simple_color(args),
        Commands::HidePicture(args) => handle_hide_picture(args),
        Commands::RevealPicture(args) => handle_reveal_picture(args),
        Commands::Outline(args) => handle_outline(args),
        Commands::HideText(args) => handle_hide_text(args),
        Commands::RevealText(args) => handle_reveal_text(args),
    }
}
