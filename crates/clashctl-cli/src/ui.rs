//! 终端输出相关的辅助函数

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// 控制器不可达时的提示
pub const DAEMON_HINT: &str = "Make sure Clash is running and external controller is enabled";

/// 标题下方的分隔线
pub const RULE: &str = "============";

/// 创建一个标准格式的进度条（输出到 stderr，非终端时自动隐藏）
pub fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// 按延迟着色: < 200ms 绿色, < 500ms 黄色, 其余红色
pub fn colored_latency(delay: f64) -> ColoredString {
    let text = format!("{:.0} ms", delay);
    if delay < 200.0 {
        text.green()
    } else if delay < 500.0 {
        text.yellow()
    } else {
        text.red()
    }
}

/// 字节/秒 格式化为 B/s、KB/s 或 MB/s
pub fn format_speed(speed: u64) -> String {
    if speed < 1024 {
        format!("{} B/s", speed)
    } else if speed < 1024 * 1024 {
        format!("{:.2} KB/s", speed as f64 / 1024.0)
    } else {
        format!("{:.2} MB/s", speed as f64 / 1024.0 / 1024.0)
    }
}

/// 当前选中节点的标记
pub fn selection_marker(member: &str, now: Option<&str>) -> &'static str {
    if now == Some(member) {
        "*"
    } else {
        " "
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_matches_only_current_member() {
        assert_eq!(selection_marker("HK-01", Some("HK-01")), "*");
        assert_eq!(selection_marker("JP-02", Some("HK-01")), " ");
        assert_eq!(selection_marker("JP-02", None), " ");
    }

    #[test]
    fn latency_text_is_rounded() {
        colored::control::set_override(false);
        assert_eq!(colored_latency(87.4).to_string(), "87 ms");
        assert_eq!(colored_latency(612.0).to_string(), "612 ms");
    }

    #[test]
    fn speed_switches_unit_at_1024() {
        assert_eq!(format_speed(0), "0 B/s");
        assert_eq!(format_speed(1023), "1023 B/s");
        assert_eq!(format_speed(1024), "1.00 KB/s");
        assert_eq!(format_speed(1536), "1.50 KB/s");
        assert_eq!(format_speed(3 * 1024 * 1024), "3.00 MB/s");
    }
}
