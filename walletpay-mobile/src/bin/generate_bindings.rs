//! Generates the Swift/Kotlin bindings for walletpay-mobile with uniffi_bindgen's library mode.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use uniffi_bindgen::bindings::{KotlinBindingGenerator, SwiftBindingGenerator};
use uniffi_bindgen::library_mode::generate_bindings;
use uniffi_bindgen::{BindingGenerator, EmptyCrateConfigSupplier};

#[derive(Parser)]
#[command(name = "generate-bindings")]
#[command(about = "Generate UniFFI bindings for walletpay-mobile")]
struct Cli {
    /// Path to the compiled library (.dylib, .so, or .a file)
    #[arg(long, default_value = "../target/release/libwalletpay_mobile.dylib")]
    library: Utf8PathBuf,

    /// Output language
    #[arg(short = 'l', long = "language", default_value = "swift")]
    language: Language,

    /// Output directory
    #[arg(short = 'o', long = "out-dir")]
    out_dir: Option<Utf8PathBuf>,
}

/// Only the two wallet shims consume bindings.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Language {
    Swift,
    Kotlin,
}

impl Language {
    fn default_out_dir(self) -> Utf8PathBuf {
        match self {
            Self::Swift => Utf8PathBuf::from("ios/generated"),
            Self::Kotlin => Utf8PathBuf::from("android/generated"),
        }
    }
}

fn run<G: BindingGenerator>(
    library: &Utf8PathBuf,
    generator: &G,
    out_dir: &Utf8PathBuf,
) -> anyhow::Result<()> {
    generate_bindings(
        library,
        None,
        generator,
        &EmptyCrateConfigSupplier,
        None,
        out_dir,
        false,
    )?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let out_dir = cli
        .out_dir
        .unwrap_or_else(|| cli.language.default_out_dir());

    if !cli.library.exists() {
        anyhow::bail!("Library not found: {}", cli.library);
    }
    std::fs::create_dir_all(&out_dir)?;

    println!(
        "Generating {:?} bindings from {} into {}",
        cli.language, cli.library, out_dir
    );

    match cli.language {
        Language::Swift => run(&cli.library, &SwiftBindingGenerator, &out_dir)?,
        Language::Kotlin => run(&cli.library, &KotlinBindingGenerator, &out_dir)?,
    }

    println!("Bindings generated successfully");
    Ok(())
}
