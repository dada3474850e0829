//! A stochastic agent-based arithmetic solver in the style of Numbo (Hofstadter & Mitchell,
//! *Fluid Concepts and Creative Analogies*). Given a target integer and a multiset of brick
//! integers, repeatedly draws small tasks ("codelets") from a priority-weighted pool and runs
//! them to completion; each codelet reads and mutates a shared workspace (the [`cytoplasm`])
//! and a long-term semantic network (the [`slipnet`]) and may enqueue further codelets onto
//! the pool (the [`rack`]).

pub mod animation;
pub mod codelet;
pub mod cytoplasm;
pub mod driver;
pub mod input;
pub mod rack;
pub mod seed;
pub mod slipnet;

/// a numeric cyto/slipnet label, always the decimal string form of an integer or an operator symbol
pub type Label = String;

/// a positive weight used by the [`rack::Rack`] to bias random draws
pub type Urgency = u32;

/// a bounded [0, 100] slipnet activation level
pub type Activation = i32;

/// a bounded [0, 100] cytoplasm temperature
pub type Temperature = i32;

/// initialize terminal + file logging, following the pattern of every native binary in this codebase
pub fn init_logging(verbose: bool) {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves forward")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Trace,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
