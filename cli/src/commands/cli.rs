use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    Input,
    Output,
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "TestSavant.AI Guard from the command line")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./guard.toml, then ~/.guard/config.toml).
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ScannersArgs {
    #[arg(long, value_enum, default_value_t = ScanKind::Input)]
    pub category: ScanKind,

    /// Mark the scanners this project uses by default.
    #[arg(long)]
    pub project_id: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DefaultsArgs {
    #[arg(long)]
    pub project_id: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long, value_enum, default_value_t = ScanKind::Input)]
    pub scan_type: ScanKind,

    /// Prompt text; when blank each item's own `prompt` is used.
    #[arg(long, default_value = "")]
    pub prompt: String,

    /// Output text; when blank each item's own `output` is used.
    #[arg(long, default_value = "")]
    pub output: String,

    /// Project whose saved scanners are used when no --scanner is given
    /// (defaults to config).
    #[arg(long)]
    pub project_id: Option<String>,

    /// Scanner token as listed by `guard scanners`. Can be specified multiple times.
    #[arg(long = "scanner", action = clap::ArgAction::Append)]
    pub scanners: Vec<String>,

    /// Items as a JSON array or JSON lines; `-` reads stdin.
    #[arg(long)]
    pub input: Option<String>,

    /// Route failed items to "not valid" instead of aborting.
    #[arg(long, default_value_t = false)]
    pub continue_on_fail: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DescribeArgs {
    /// Print the credential description instead of the node description.
    #[arg(long, default_value_t = false)]
    pub credential: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List projects (with the "no project" entry first).
    Projects,
    /// List scanners for a category.
    Scanners(ScannersArgs),
    /// Show a project's default scanner tokens.
    Defaults(DefaultsArgs),
    /// Scan a prompt or output.
    Validate(ValidateArgs),
    /// Check the API key against the project listing.
    Verify,
    /// Print the node or credential description.
    Describe(DescribeArgs),
}
