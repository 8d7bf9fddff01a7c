//! CLI argument parsing and subcommand dispatch.

use chrono::{Duration, Utc};
use uuid::Uuid;

use promptwall_core::{Config, Prompt};
use promptwall_scheduling::{rotation_window, SchedulingConfigStore};
use promptwall_store::{CategoryStore, JsonPromptStore, PromptRepository};

use crate::activation::run_activation_pass;

/// Sample prompts created by `seed`, cycled when more are requested.
const SAMPLE_PROMPTS: &[(&str, &str, &str)] = &[
    (
        "Morning Light Study",
        "Capture the beauty of morning light in your creative medium. Focus on how light transforms ordinary objects.",
        "morning,light,study",
    ),
    (
        "Urban Stories",
        "Tell a story about city life through your art. What stories do the streets whisper?",
        "urban,stories,city",
    ),
    (
        "Nature Patterns",
        "Find and showcase patterns in nature. From leaf veins to cloud formations.",
        "nature,patterns,organic",
    ),
    (
        "Color Emotions",
        "Express emotions through color choices. How do colors make you feel?",
        "color,emotions,feelings",
    ),
];

/// Parse CLI arguments and dispatch to the appropriate subcommand.
///
/// Returns `Ok(true)` if a subcommand was handled, `Ok(false)` if `serve`
/// should be started (handled by the caller).
pub async fn dispatch(config: &Config, args: &[String]) -> anyhow::Result<bool> {
    match args.get(1).map(|s| s.as_str()) {
        Some("seed") => {
            let count = args
                .get(2)
                .map(|s| s.parse::<usize>())
                .transpose()?
                .unwrap_or(SAMPLE_PROMPTS.len());
            seed(config, count)?;
            Ok(true)
        }
        Some("check") => {
            check(config)?;
            Ok(true)
        }
        Some("activate") => {
            activate(config)?;
            Ok(true)
        }
        Some("serve") | None => Ok(false),
        _ => {
            print_usage();
            Ok(true)
        }
    }
}

/// Replace all prompts with `count` active test prompts, staggered one
/// second apart so rotation order matches creation order.
fn seed(config: &Config, count: usize) -> anyhow::Result<()> {
    let data_dir = &config.storage.data_dir;
    let prompts = JsonPromptStore::new(data_dir)?;
    let categories = CategoryStore::new(data_dir)?;

    for prompt in prompts.list_ordered()? {
        prompts.delete(prompt.id)?;
    }
    println!("Cleared existing prompts");

    let category_list = categories.list()?;
    let now = Utc::now();
    for i in 0..count {
        let (title, description, tags) = SAMPLE_PROMPTS[i % SAMPLE_PROMPTS.len()];
        let category = category_list[i % category_list.len()].clone();
        let title = if i < SAMPLE_PROMPTS.len() {
            title.to_string()
        } else {
            format!("{} #{}", title, i / SAMPLE_PROMPTS.len() + 1)
        };
        let prompt = prompts.insert(Prompt {
            id: Uuid::new_v4(),
            title,
            description: description.to_string(),
            category,
            tags: tags.split(',').map(|t| t.to_string()).collect(),
            scheduled_for: now + Duration::seconds(i as i64),
            is_active: true,
            created_by: "admin".to_string(),
            submission_count: 0,
            created_at: now,
        })?;
        println!("Created: {}", prompt.title);
    }

    println!("\nSeeded {} prompts; they rotate in creation order.", count);
    Ok(())
}

/// Print every prompt's schedule state and the current rotation pick.
fn check(config: &Config) -> anyhow::Result<()> {
    let data_dir = &config.storage.data_dir;
    let prompts = JsonPromptStore::new(data_dir)?;
    let scheduling = SchedulingConfigStore::new(data_dir)?;

    let all = prompts.list_ordered()?;
    println!("Total prompts: {}\n", all.len());
    for (i, prompt) in all.iter().enumerate() {
        println!("{}. {}", i + 1, prompt.title);
        println!("   id:        {}", prompt.id);
        println!("   active:    {}", prompt.is_active);
        println!("   scheduled: {}", prompt.scheduled_for);
    }

    let active: Vec<&Prompt> = all.iter().filter(|p| p.is_active).collect();
    println!("\nActive: {}, inactive: {}", active.len(), all.len() - active.len());

    let sched = scheduling.get();
    println!("\nScheduling config:\n{}", serde_json::to_string_pretty(&sched)?);

    let window = rotation_window(
        Utc::now(),
        sched.base_time,
        sched.interval_minutes,
        active.len(),
    );
    match window.slot() {
        Some(slot) => {
            println!(
                "\nCurrent rotation: index {} of {} -> \"{}\"",
                window.index,
                active.len(),
                active[slot].title
            );
            println!("Window: {} to {}", window.interval_start, window.interval_end);
        }
        None => println!("\nCurrent rotation: no active prompts"),
    }
    Ok(())
}

/// Run exactly one activation pass and report the transitions.
fn activate(config: &Config) -> anyhow::Result<()> {
    let data_dir = &config.storage.data_dir;
    let prompts = JsonPromptStore::new(data_dir)?;
    let scheduling = SchedulingConfigStore::new(data_dir)?;

    let sched = scheduling.get();
    if !sched.is_active {
        println!("Scheduling is inactive; pass will make no changes.");
    }
    let (activated, deactivated) = run_activation_pass(&sched, &prompts, Utc::now())?;
    println!("Activated {} prompts, deactivated {}", activated, deactivated);
    Ok(())
}

fn print_usage() {
    println!("promptwall v0.1.0");
    println!("Usage: promptwall-server <command>");
    println!("  serve            Start the HTTP server and activation job (default)");
    println!("  seed [count]     Replace all prompts with active test prompts");
    println!("  check            Print schedule state and the current rotation pick");
    println!("  activate         Run one activation pass and exit");
}
