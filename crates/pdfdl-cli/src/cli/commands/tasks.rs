//! `pdfdl tasks` – print the enumerated task list.

use anyhow::Result;
use pdfdl_core::config::FetchConfig;
use pdfdl_core::manifest;

pub fn run_list_tasks(cfg: &FetchConfig) -> Result<()> {
    let tasks = manifest::enumerate_tasks(cfg);
    if tasks.is_empty() {
        println!("No download tasks found.");
        return Ok(());
    }
    println!("{:<40} {}", "FILE", "URL");
    for t in &tasks {
        println!("{:<40} {}", t.local_filename, t.remote_url);
    }
    println!("{} task(s)", tasks.len());
    Ok(())
}
