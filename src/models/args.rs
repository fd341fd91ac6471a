use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// 目标地址
    #[arg(short, long)]
    pub(crate) url: String,

    /// 单个请求的超时时间（秒）
    #[arg(short, long, default_value_t = 5)]
    pub(crate) timeout: u64,

    /// API key，各策略按自己的方式携带
    #[arg(short, long)]
    pub(crate) api_key: Option<String>,

    /// 以json输出结果
    #[arg(short, long, default_value_t = false)]
    pub(crate) json: bool,
}
