//! CLI module for the lifelog application
//!
//! This module handles the command-line interface: it validates user input
//! the way the logging forms do, builds records, hands them to the journal
//! and renders the dashboard and insights views.
use std::path::PathBuf;

use log::{debug, info};

use chrono::NaiveDate;
use console::style;

use crate::{
    category_catalog, category_label, format_average, format_long, lookup_category,
    lookup_mood_factor, lookup_mood_level, make_activity, make_mood, mood_factor_catalog,
    mood_level_catalog, parse_date_arg, parse_factors, today, Commands, Config, DailySummary,
    InsightsReport, JournalStorage, KeyValueStore, LifeLogError, Result,
};

/// Longest single activity the log form accepts, in minutes
pub const MAX_ACTIVITY_MINUTES: u32 = 24 * 60;

/// Widest insights window, in days
pub const MAX_INSIGHTS_DAYS: u32 = 366;

/// CLI Application handler - processes CLI commands against the journal
pub struct App<S: KeyValueStore> {
    /// The journal storage backend
    storage: JournalStorage<S>,

    /// Application configuration
    config: Config,

    /// Date treated as "today" for defaults and windows
    today: NaiveDate,

    /// Where `config --reset` writes the defaults
    config_path: Option<PathBuf>,
}

impl<S: KeyValueStore> App<S> {
    /// Create a new CLI application with the given storage backend and config
    pub fn new(storage: JournalStorage<S>, config: Config) -> Self {
        Self {
            storage,
            config,
            today: today(),
            config_path: None,
        }
    }

    /// Set the configuration file managed by the `config` command
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Pin the date used as "today"
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn storage(&self) -> &JournalStorage<S> {
        &self.storage
    }

    /// Run the CLI application with the given command
    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Activity {
                category,
                description,
                duration,
                date,
            } => self.log_activity(category, description, duration, date.as_deref())?,

            Commands::Mood {
                level,
                note,
                factors,
                date,
            } => self.log_mood(level, note, factors, date.as_deref())?,

            Commands::Today { date, json } => self.show_day(date.as_deref(), json)?,

            Commands::Insights { range, json } => self.show_insights(range, json)?,

            Commands::Catalog => self.show_catalog(),

            Commands::Config { reset } => self.handle_config(reset)?,
        }

        Ok(())
    }

    fn log_activity(
        &self,
        category: String,
        description: String,
        duration: u32,
        date: Option<&str>,
    ) -> Result<()> {
        let date = parse_date_arg(date, self.today)?;

        let category_info = lookup_category(&category).ok_or_else(|| LifeLogError::Validation {
            message: format!("unknown category '{}'", category),
        })?;
        if description.trim().is_empty() {
            return Err(LifeLogError::Validation {
                message: "description must not be empty".to_string(),
            });
        }
        if duration == 0 || duration > MAX_ACTIVITY_MINUTES {
            return Err(LifeLogError::Validation {
                message: format!(
                    "duration must be between 1 and {} minutes, got {}",
                    MAX_ACTIVITY_MINUTES, duration
                ),
            });
        }

        let activity = make_activity(category_info.id, description.trim(), duration, date);
        if !self.storage.save_activity(&activity) {
            return Err(LifeLogError::SaveFailed {
                record: "activity".to_string(),
            });
        }

        info!("Logged activity {} on {}", activity.id, date);
        println!(
            "Logged {} {} for {} min on {}",
            category_info.icon,
            style(category_info.label).bold(),
            duration,
            format_long(date)
        );
        Ok(())
    }

    fn log_mood(
        &self,
        level: u8,
        note: Option<String>,
        factors: Option<String>,
        date: Option<&str>,
    ) -> Result<()> {
        let date = parse_date_arg(date, self.today)?;

        let level_info =
            lookup_mood_level(i64::from(level)).ok_or_else(|| LifeLogError::Validation {
                message: format!("mood level must be between 1 and 5, got {}", level),
            })?;

        let factors = parse_factors(factors);
        if let Some(unknown) = factors.iter().find(|f| lookup_mood_factor(f).is_none()) {
            return Err(LifeLogError::Validation {
                message: format!("unknown mood factor '{}'", unknown),
            });
        }

        let mood = make_mood(level, note, factors, date);
        if !self.storage.save_mood(&mood) {
            return Err(LifeLogError::SaveFailed {
                record: "mood".to_string(),
            });
        }

        info!("Recorded mood {} on {}", mood.id, date);
        println!(
            "Recorded mood {} {} for {}",
            level_info.icon,
            style(level_info.label).bold(),
            format_long(date)
        );
        Ok(())
    }

    fn show_day(&self, date: Option<&str>, json: bool) -> Result<()> {
        let date = parse_date_arg(date, self.today)?;
        let summary = DailySummary::for_date(&self.storage, date);

        if json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        println!("{}", style(format_long(date)).bold());
        println!(
            "Activities: {} | Total time: {}",
            summary.activity_count, summary.total_time
        );

        match (&summary.mood, summary.mood_level) {
            (Some(mood), level) => {
                let (icon, label) = level.map(|l| (l.icon, l.label)).unwrap_or(("❓", ""));
                println!("Mood: {} {}", icon, label);
                if let Some(note) = &mood.note {
                    println!("  \"{}\"", note);
                }
                if !mood.factors.is_empty() {
                    let labels: Vec<&str> = mood
                        .factors
                        .iter()
                        .map(|f| lookup_mood_factor(f).map(|info| info.label).unwrap_or(f.as_str()))
                        .collect();
                    println!("  Factors: {}", style(labels.join(", ")).cyan());
                }
            }
            (None, _) => println!("Mood: not recorded yet"),
        }

        if summary.groups.is_empty() {
            println!("\nNo activities logged for this day.");
            return Ok(());
        }

        let separator = "-".repeat(terminal_width().min(50));
        for group in &summary.groups {
            println!("{}", separator);
            let icon = group.info.map(|c| c.icon).unwrap_or("❓");
            let label = category_label(&group.category);
            println!(
                "{} {} ({} min)",
                icon,
                style(label).bold(),
                group.total_minutes
            );
            for activity in &group.activities {
                println!("  - {} ({} min)", activity.description, activity.duration);
            }
        }

        Ok(())
    }

    fn show_insights(&self, range: Option<u32>, json: bool) -> Result<()> {
        let days = range.unwrap_or(self.config.default_range_days);
        if days == 0 || days > MAX_INSIGHTS_DAYS {
            return Err(LifeLogError::Validation {
                message: format!(
                    "range must be between 1 and {} days, got {}",
                    MAX_INSIGHTS_DAYS, days
                ),
            });
        }

        debug!("Building insights for the last {} days", days);
        let report = InsightsReport::build(&self.storage, self.today, days);

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("{}", style(format!("Insights for the last {} days", days)).bold());
        println!(
            "Average mood: {} {}",
            format_average(report.average_mood),
            report.closest_mood_level.map(|l| l.label).unwrap_or("")
        );
        println!("Total activity time: {}", report.total_time);
        println!(
            "Days with activities: {} | Days with a mood: {}",
            report.active_days, report.mood_days
        );

        println!("\n{}", style("Mood trend").bold());
        for (label, level) in report.labels.iter().zip(&report.mood_series) {
            let cell = level
                .and_then(|l| lookup_mood_level(i64::from(l)))
                .map(|info| format!("{} {}", info.icon, info.id))
                .unwrap_or_else(|| "-".to_string());
            println!("  {:>7}  {}", label, cell);
        }

        if report.categories.is_empty() {
            println!("\nNo activities logged in this period.");
            return Ok(());
        }

        println!("\n{}", style("Time by category").bold());
        for total in &report.categories {
            println!(
                "  {:<12} {:>6} min",
                category_label(&total.category),
                total.minutes
            );
        }

        Ok(())
    }

    fn handle_config(&self, reset: bool) -> Result<()> {
        if reset {
            let path = self
                .config_path
                .as_ref()
                .ok_or_else(|| LifeLogError::ConfigError {
                    message: "no configuration file location is known".to_string(),
                })?;
            Config::default().save(path)?;
            println!("Configuration reset to defaults at {}", path.display());
            return Ok(());
        }

        if let Some(path) = &self.config_path {
            println!("Config file: {}", path.display());
        }
        println!("{}", serde_json::to_string_pretty(&self.config)?);
        Ok(())
    }

    fn show_catalog(&self) {
        println!("{}", style("Activity categories").bold());
        for category in category_catalog() {
            println!("  {:<10} {} {}", category.id, category.icon, category.label);
        }

        println!("\n{}", style("Mood levels").bold());
        for level in mood_level_catalog() {
            println!("  {}  {} {}", level.id, level.icon, level.label);
        }

        println!("\n{}", style("Mood factors").bold());
        for factor in mood_factor_catalog() {
            println!("  {:<10} {} {}", factor.id, factor.icon, factor.label);
        }
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}
