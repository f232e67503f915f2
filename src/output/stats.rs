//! Statistics reporting.

use console::style;

use crate::download::DownloadStats;

/// Print statistics for a finished run.
pub fn print_creator_stats(stats: &DownloadStats) {
    let creator = stats
        .display_name
        .as_deref()
        .or(stats.creator.as_deref())
        .unwrap_or("unknown");

    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style(format!("Statistics for {}:", creator)).bold());
    println!("  Posts:       {}", stats.posts);
    println!("  Attachments: {} ({} skipped)", stats.attachments, stats.skipped);
    println!("  Pictures:    {}", stats.pic_count);
    println!("  Videos:      {}", stats.vid_count);
    println!("  Audio:       {}", stats.audio_count);
    println!("  Other:       {}", stats.other_count);
    if stats.failed_count > 0 {
        println!("  Failed:      {}", style(stats.failed_count).red());
    }
    println!(
        "  Total:       {} downloaded ({})",
        stats.total_downloaded(),
        indicatif::HumanBytes(stats.bytes_downloaded)
    );
    println!("{}", style("═".repeat(50)).dim());
}
