use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use std::time::Instant;

static PERF_ENABLED: AtomicBool = AtomicBool::new(false);
static PERF_INIT: Once = Once::new();

/// 每个样本的估算内存（字节）
pub const BYTES_PER_SAMPLE: usize = 200;

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 读取性能日志开关
///
/// 开关：
/// - Debug 默认开启；Release 默认关闭（可通过环境变量开启）
/// - `FURNACE_TCO_PERF=1` 强制开启，`=0` 强制关闭
fn perf_enabled() -> bool {
    PERF_INIT.call_once(|| {
        let enabled = match std::env::var("FURNACE_TCO_PERF") {
            Ok(v) => is_true(&v),
            Err(_) => cfg!(debug_assertions),
        };
        PERF_ENABLED.store(enabled, Ordering::Relaxed);
    });
    PERF_ENABLED.load(Ordering::Relaxed)
}

/// 单次计算的性能指标
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationMetrics {
    pub calculation_time_ms: f64,
    pub data_points: usize,
    pub estimated_memory_bytes: usize,
}

impl CalculationMetrics {
    pub fn new(calculation_time_ms: f64, data_points: usize) -> Self {
        Self {
            calculation_time_ms,
            data_points,
            estimated_memory_bytes: estimate_memory_usage(data_points),
        }
    }
}

/// 粗略估算序列占用内存
pub fn estimate_memory_usage(data_points: usize) -> usize {
    data_points.saturating_mul(BYTES_PER_SAMPLE)
}

/// 性能统计 Guard：记录 elapsed_ms + 样本数
///
/// 使用方式：
/// ```ignore
/// let mut perf = furnace_tco::perf::PerfGuard::new("simulate_wear");
/// // do work...
/// perf.set_data_points(samples.len());
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    data_points: usize,
    nested: bool,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let current = d.get();
            d.set(current.saturating_add(1));
            current
        });
        Self {
            op,
            start: Instant::now(),
            data_points: 0,
            nested: depth > 0,
        }
    }

    pub fn set_data_points(&mut self, count: usize) {
        self.data_points = count;
    }

    /// 到目前为止的耗时（毫秒）
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// 生成当前指标快照
    pub fn metrics(&self) -> CalculationMetrics {
        CalculationMetrics::new(self.elapsed_ms(), self.data_points)
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if perf_enabled() {
            let elapsed_ms = self.start.elapsed().as_millis() as u64;
            tracing::info!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                data_points = self.data_points,
                nested = self.nested,
                "done"
            );
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
