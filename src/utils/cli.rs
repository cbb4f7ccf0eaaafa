use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Data bucket sampled and mutated by the pipeline
    #[arg(long, env = "BUCKETWATCH_BUCKET", default_value = "bucketwatch-data")]
    pub bucket: String,

    /// Size-history table name
    #[arg(long, env = "BUCKETWATCH_TABLE", default_value = "bucket_size_history")]
    pub table: String,

    /// Bucket the rendered chart is uploaded to
    #[arg(long, env = "BUCKETWATCH_PLOT_BUCKET", default_value = "bucketwatch-plots")]
    pub plot_bucket: String,

    /// Object key of the chart artifact
    #[arg(long, env = "BUCKETWATCH_PLOT_KEY", default_value = "plot.svg")]
    pub plot_key: String,

    /// Transient local path the chart is rendered to before upload
    #[arg(
        long,
        env = "BUCKETWATCH_CHART_PATH",
        default_value = "/tmp/bucketwatch-plot.svg"
    )]
    pub chart_path: String,

    /// Object store backend type
    #[arg(long, env = "BUCKETWATCH_OBJECT_STORE", default_value = "S3")]
    pub object_store: String,

    /// History table backend type
    #[arg(long, env = "BUCKETWATCH_HISTORY_STORE", default_value = "DYNAMODB")]
    pub history_store: String,

    /// Root directory for the FILESYSTEM object store
    #[arg(long, env = "BUCKETWATCH_ROOTDIR", default_value = "/var/lib/bucketwatch")]
    pub root: String,

    /// Region buckets are created in
    #[arg(long, env = "AWS_REGION", default_value = "us-west-1")]
    pub region: String,

    /// Endpoint URL override (MinIO-style deployments)
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint: Option<String>,

    /// Plot endpoint the drive script POSTs to
    #[arg(
        long,
        env = "BUCKETWATCH_PLOT_URL",
        default_value = "http://127.0.0.1:8968/plot"
    )]
    pub plot_url: String,

    /// Fixed delay between drive script steps, in seconds
    #[arg(long, env = "BUCKETWATCH_STEP_DELAY", default_value_t = 2)]
    pub step_delay: u64,

    /// Width of the plotted history window, in seconds
    #[arg(long, env = "BUCKETWATCH_WINDOW", default_value_t = 10)]
    pub window: i64,

    /// Trigger server listening host
    #[arg(long, env = "BUCKETWATCH_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Trigger server listening port
    #[arg(short, long, env = "BUCKETWATCH_PORT", default_value_t = 8968)]
    pub port: u16,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Create the data bucket and the size-history table")]
    Provision,
    #[command(about = "Sample the bucket size and append one history row")]
    Sample,
    #[command(about = "Run the scripted object workload, then trigger the plot endpoint")]
    Drive,
    #[command(about = "Render the size-history chart and upload it")]
    Plot,
    #[command(about = "Serve the HTTP trigger endpoints")]
    Serve,
}
