use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "assetdash",
    version,
    about = "terminal dashboard client for remote asset inventories",
    long_about = "Assetdash is a terminal client for asset inventories served by a single-endpoint RPC backend.\n\nExamples:\n  assetdash --endpoint https://script.example.com/macros/s/ID/exec dashboard\n  assetdash assets --search desk --page 2\n  assetdash assets --interactive\n  assetdash asset add --name Laptop --category IT --location HQ --status Active\n\nTip: Persist the endpoint in ~/.assetdash/config.yml to keep invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'e',
        long = "ep",
        visible_alias = "endpoint",
        value_name = "URL",
        global = true,
        help_heading = "Connection",
        help = "Backend endpoint URL (required for remote commands)."
    )]
    pub endpoint: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Connection",
        help = "Path to config file (defaults to ~/.assetdash/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        global = true,
        help_heading = "Connection",
        help = "Request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'x',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        global = true,
        help_heading = "Connection",
        help = "Route requests through the given proxy."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'o',
        long = "of",
        visible_alias = "output",
        value_name = "FORMAT",
        global = true,
        help_heading = "Output",
        help = "Output format: table or json."
    )]
    pub output: Option<String>,

    #[arg(
        long = "ps",
        visible_alias = "page-size",
        value_name = "N",
        global = true,
        help_heading = "Output",
        help = "Rows per page in asset listings."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        global = true,
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        global = true,
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Show inventory totals, category/location charts, and recent activity.")]
    Dashboard,

    #[command(about = "List assets with filtering and pagination.")]
    Assets(AssetsArgs),

    #[command(subcommand, about = "Create, edit, or delete a single asset.")]
    Asset(AssetCommand),

    #[command(about = "List categories.")]
    Categories,

    #[command(subcommand, about = "Create, edit, or delete a single category.")]
    Category(RefCommand),

    #[command(about = "List locations.")]
    Locations,

    #[command(subcommand, about = "Create, edit, or delete a single location.")]
    Location(RefCommand),

    #[command(about = "Generate a report on the backend and print it.")]
    Report(ReportArgs),

    #[command(about = "Store the active user identity.")]
    Login(LoginArgs),

    #[command(about = "Clear the active user identity.")]
    Logout,

    #[command(about = "Show the active user identity.")]
    Whoami,
}

#[derive(Args, Debug, Clone)]
pub struct AssetsArgs {
    #[arg(
        short = 's',
        long = "se",
        visible_alias = "search",
        value_name = "TERM",
        help_heading = "Filters",
        help = "Case-insensitive search on asset name or id."
    )]
    pub search: Option<String>,

    #[arg(
        long = "ct",
        visible_alias = "category",
        value_name = "NAME",
        help_heading = "Filters",
        help = "Keep only assets in the given category (exact match)."
    )]
    pub category: Option<String>,

    #[arg(
        long = "lc",
        visible_alias = "location",
        value_name = "NAME",
        help_heading = "Filters",
        help = "Keep only assets at the given location (exact match)."
    )]
    pub location: Option<String>,

    #[arg(
        long = "st",
        visible_alias = "status",
        value_name = "STATUS",
        help_heading = "Filters",
        help = "Keep only assets with the given status (exact match)."
    )]
    pub status: Option<String>,

    #[arg(
        short = 'p',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "Output",
        help = "Page to display (clamped to the available range)."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 'I',
        long = "it",
        visible_alias = "interactive",
        help_heading = "Output",
        help = "Browse interactively (n/p to page, s/c/l/st to filter, q to quit)."
    )]
    pub interactive: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AssetCommand {
    #[command(about = "Create a new asset.")]
    Add(AddAssetArgs),

    #[command(about = "Edit an asset by id.")]
    Edit(IdArg),

    #[command(about = "Delete an asset by id.")]
    Rm(RmArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AddAssetArgs {
    #[arg(long, value_name = "NAME", help = "Asset name.")]
    pub name: String,

    #[arg(long, value_name = "NAME", help = "Category name.")]
    pub category: String,

    #[arg(long, value_name = "NAME", help = "Location name.")]
    pub location: String,

    #[arg(long, value_name = "STATUS", help = "Status label (e.g. Active).")]
    pub status: String,

    #[arg(
        long = "purchase-date",
        value_name = "DATE",
        help = "Purchase date (YYYY-MM-DD)."
    )]
    pub purchase_date: Option<String>,

    #[arg(
        long,
        value_name = "AMOUNT",
        help = "Purchase value (unparsable input counts as 0)."
    )]
    pub value: Option<String>,

    #[arg(long, value_name = "TEXT", help = "Free-form description.")]
    pub description: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct IdArg {
    #[arg(value_name = "ID", help = "Record id.")]
    pub id: String,
}

#[derive(Args, Debug, Clone)]
pub struct RmArgs {
    #[arg(value_name = "ID", help = "Record id.")]
    pub id: String,

    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt.")]
    pub yes: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RefCommand {
    #[command(about = "Create a new record.")]
    Add,

    #[command(about = "Edit a record by id.")]
    Edit(IdArg),

    #[command(about = "Delete a record by id.")]
    Rm(RmArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[arg(
        short = 't',
        long = "tp",
        visible_alias = "type",
        value_name = "TYPE",
        help = "Report type understood by the backend."
    )]
    pub kind: String,

    #[arg(
        long = "sd",
        visible_alias = "start-date",
        value_name = "DATE",
        help = "Report window start (YYYY-MM-DD)."
    )]
    pub start_date: Option<String>,

    #[arg(
        long = "ed",
        visible_alias = "end-date",
        value_name = "DATE",
        help = "Report window end (YYYY-MM-DD)."
    )]
    pub end_date: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    #[arg(
        short = 'm',
        long = "em",
        visible_alias = "email",
        value_name = "EMAIL",
        help = "Account email."
    )]
    pub email: String,

    #[arg(long = "nm", visible_alias = "name", value_name = "NAME", help = "Display name.")]
    pub name: Option<String>,
}
