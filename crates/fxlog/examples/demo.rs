//! Tour of the logger: types, scopes, timers and custom configuration.
//!
//! Run with `cargo run -p fxlog --example demo`. Set `FXLOG_PLAIN=1` for
//! uncolored output.

use std::thread;
use std::time::Duration;

use fxlog::{
    ColorScope, Element, LogTypeConfig, PartialConfig, Prefix, Preset, Value, create_logger,
};

fn main() -> fxlog::Result<()> {
    fxlog::logging::FxLogBridge::try_init(log::Level::Warn);

    let mut logger = create_logger(None);
    logger.log(["plain message"])?;
    logger.info(["listening on", "0.0.0.0:8080"])?;
    logger.success(["ready in", "42ms"])?;
    fxlog::warn!(logger, "disk at", 91, "percent")?;
    fxlog::error!(logger, "request failed", Value::object([("status", 503)]))?;

    let db = logger.scope(["db"]);
    fxlog::info!(db, "pool size", 8)?;
    fxlog::info!(db.scope(["migrations"]), "applied", 3)?;

    let label = logger.time("warmup");
    thread::sleep(Duration::from_millis(120));
    logger.time_end(label.as_str());

    let custom = create_logger(
        PartialConfig::new()
            .scope(vec!["worker", "7"])
            .prefix(Prefix::dynamic(|| {
                Ok::<_, fxlog::BoxError>(format!("pid:{}", std::process::id()))
            }))
            .presets([Preset::Scope, Preset::Filename, Preset::Badge, Preset::Label])
            .color_scope(ColorScope::All)
            .uppercase([Element::Label])
            .underline([Element::Scope])
            .log_type(
                "santa",
                LogTypeConfig::new("santa").with_badge("🎅").with_color("red"),
            ),
    );
    custom.emit("santa", ["ho ho ho"])?;
    fxlog::info!(custom, "cycle:", cyclic())?;

    let mut quiet = custom.unscope();
    quiet.disable();
    quiet.error(["never shown"])?;

    // Ending an unknown timer only emits a diagnostic through the bridge.
    logger.time_end("never-started");
    Ok(())
}

fn cyclic() -> Value {
    let node = Value::object([("id", 1)]);
    node.insert("parent", node.clone());
    node
}
