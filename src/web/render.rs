//! minijinja environment holding the compiled-in page templates.
use chrono::DateTime;
use minijinja::Environment;
use serde::Serialize;

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_filter("timestamp", format_timestamp);
        env.add_template("index.html", include_str!("../../templates/index.html"))?;
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}

/// Unix seconds as a UTC date-time; 0 means the zone was never checked.
fn format_timestamp(secs: i64) -> String {
    if secs == 0 {
        return "never".to_string();
    }
    match DateTime::from_timestamp(secs, 0) {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => secs.to_string(),
    }
}
