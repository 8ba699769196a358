use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "herbal", about = "Ayurvedic plant & disease insights", version)]
#[command(group(ArgGroup::new("mode").args(["plant", "disease"]).multiple(false)))]
#[command(group(ArgGroup::new("md_switch").args(["md", "no_md"]).multiple(false)))]
pub struct Cli {
    /// Plant or disease name to look up.
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Search by plant (default).
    #[arg(short = 'p', long)]
    pub plant: bool,

    /// Search by disease.
    #[arg(short = 'd', long)]
    pub disease: bool,

    /// Large language model to use.
    #[arg(long)]
    pub model: Option<String>,

    /// Randomness of generated output.
    #[arg(long, default_value_t = 0.4, value_parser = clap::value_parser!(f32))]
    pub temperature: f32,

    /// Convert the returned HTML fragment and render it as Markdown.
    #[arg(long)]
    pub md: bool,
    /// Print the returned fragment as-is.
    #[arg(long = "no-md")]
    pub no_md: bool,

    /// Start the interactive search form.
    #[arg(short = 'i', long)]
    pub interactive: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
