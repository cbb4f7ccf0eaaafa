use crate::utils::cli::Args;

#[derive(Clone, Debug)]
pub struct Config {
    pub bucket: String,
    pub table: String,
    pub plot_bucket: String,
    pub plot_key: String,
    pub chart_path: String,
    pub object_store: String,
    pub history_store: String,
    pub root_dir: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub plot_url: String,
    pub step_delay_secs: u64,
    pub window_secs: i64,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            bucket: args.bucket.clone(),
            table: args.table.clone(),
            plot_bucket: args.plot_bucket.clone(),
            plot_key: args.plot_key.clone(),
            chart_path: args.chart_path.clone(),
            object_store: args.object_store.clone(),
            history_store: args.history_store.clone(),
            root_dir: args.root.clone(),
            region: args.region.clone(),
            endpoint: args.endpoint.clone(),
            plot_url: args.plot_url.clone(),
            step_delay_secs: args.step_delay,
            window_secs: args.window,
            host: args.host.clone(),
            port: args.port,
        }
    }
}
