// ==========================================
// 炉体耐磨层 TCO 分析 - 带缓存的计算引擎
// ==========================================
// 职责: 对 WearEngine / CostEngine 的结果按策略内容做记忆化
// 缓存键: 除 id / name 外全部字段的规范 JSON
// 淘汰: 超过容量时淘汰最早写入的条目
// ==========================================
// 说明: 引擎本身无共享状态，缓存是唯一的共享可变状态
// ==========================================

use crate::domain::accumulation::{CostAccumulation, WearAccumulation};
use crate::domain::strategy::{CostStructure, MaintenanceIntervention, Strategy, WearRates};
use crate::engine::cost::CostEngine;
use crate::engine::wear::WearEngine;
use crate::perf::{CalculationMetrics, PerfGuard};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// 默认缓存容量（每类序列）
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

// ==========================================
// BoundedCache - 有界缓存（先进先出淘汰）
// ==========================================
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    capacity: usize,
    entries: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K: Eq + Hash + Clone, V> BoundedCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// 写入；已存在的键只更新值，不改变淘汰顺序
    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
        }
        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

// ==========================================
// 缓存键
// ==========================================
#[derive(Serialize)]
struct FingerprintView<'a> {
    operating_hours_per_period: f64,
    total_hours: f64,
    initial_floor_thickness: f64,
    floor_min_thickness: f64,
    interventions: &'a [MaintenanceIntervention],
    wear_rates: &'a WearRates,
    costs: &'a CostStructure,
}

/// 策略内容指纹（不含 id / name）
pub fn strategy_fingerprint(strategy: &Strategy) -> String {
    let view = FingerprintView {
        operating_hours_per_period: strategy.operating_hours_per_period,
        total_hours: strategy.total_hours,
        initial_floor_thickness: strategy.initial_floor_thickness,
        floor_min_thickness: strategy.floor_min_thickness,
        interventions: &strategy.interventions,
        wear_rates: &strategy.wear_rates,
        costs: &strategy.costs,
    };
    // 仅含数值/布尔字段，序列化不会失败；NaN 在 serde_json 中输出为 null
    serde_json::to_string(&view).unwrap_or_default()
}

// ==========================================
// CalculationOutcome - 单次计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOutcome<T> {
    pub series: Vec<T>,
    pub metrics: CalculationMetrics,
    pub from_cache: bool,
}

/// 缓存统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub wear_cache_size: usize,
    pub cost_cache_size: usize,
    pub capacity: usize,
}

// ==========================================
// CachedCalculationEngine
// ==========================================
pub struct CachedCalculationEngine {
    wear_engine: WearEngine,
    cost_engine: CostEngine,
    wear_cache: BoundedCache<String, Vec<WearAccumulation>>,
    cost_cache: BoundedCache<String, Vec<CostAccumulation>>,
}

impl Default for CachedCalculationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl CachedCalculationEngine {
    pub fn new(capacity: usize) -> Self {
        Self {
            wear_engine: WearEngine::new(),
            cost_engine: CostEngine::new(),
            wear_cache: BoundedCache::new(capacity),
            cost_cache: BoundedCache::new(capacity),
        }
    }

    /// 磨损仿真（命中缓存则直接返回副本）
    pub fn simulate_wear(&mut self, strategy: &Strategy) -> CalculationOutcome<WearAccumulation> {
        let mut perf = PerfGuard::new("simulate_wear");
        let key = strategy_fingerprint(strategy);

        if let Some(cached) = self.wear_cache.get(&key) {
            perf.set_data_points(cached.len());
            return CalculationOutcome {
                series: cached.clone(),
                metrics: perf.metrics(),
                from_cache: true,
            };
        }

        let series = self.wear_engine.simulate(strategy);
        perf.set_data_points(series.len());
        self.wear_cache.insert(key, series.clone());

        CalculationOutcome {
            series,
            metrics: perf.metrics(),
            from_cache: false,
        }
    }

    /// 成本累计（命中缓存则直接返回副本）
    pub fn accumulate_cost(&mut self, strategy: &Strategy) -> CalculationOutcome<CostAccumulation> {
        let mut perf = PerfGuard::new("accumulate_cost");
        let key = strategy_fingerprint(strategy);

        if let Some(cached) = self.cost_cache.get(&key) {
            perf.set_data_points(cached.len());
            return CalculationOutcome {
                series: cached.clone(),
                metrics: perf.metrics(),
                from_cache: true,
            };
        }

        let series = self.cost_engine.accumulate(strategy);
        perf.set_data_points(series.len());
        self.cost_cache.insert(key, series.clone());

        CalculationOutcome {
            series,
            metrics: perf.metrics(),
            from_cache: false,
        }
    }

    pub fn clear_cache(&mut self) {
        self.wear_cache.clear();
        self.cost_cache.clear();
        tracing::debug!("计算缓存已清空");
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            wear_cache_size: self.wear_cache.len(),
            cost_cache_size: self.cost_cache.len(),
            capacity: self.wear_cache.capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::templates::{scenario1, scenario2};

    #[test]
    fn test_bounded_cache_evicts_oldest() {
        let mut cache = BoundedCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 10);
        cache.insert("c", 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_fingerprint_ignores_identity() {
        let a = scenario1();
        let mut b = scenario1();
        b.id = "copy".to_string();
        b.name = "Copy of scenario 1".to_string();
        assert_eq!(strategy_fingerprint(&a), strategy_fingerprint(&b));

        b.costs.labor_rate = 121.0;
        assert_ne!(strategy_fingerprint(&a), strategy_fingerprint(&b));
    }

    #[test]
    fn test_second_call_served_from_cache() {
        let mut engine = CachedCalculationEngine::new(4);
        let strategy = scenario2();

        let first = engine.simulate_wear(&strategy);
        let second = engine.simulate_wear(&strategy);
        assert!(!first.from_cache);
        assert!(second.from_cache);
        assert_eq!(first.series, second.series);
        assert_eq!(second.metrics.data_points, first.series.len());

        let cost = engine.accumulate_cost(&strategy);
        assert!(!cost.from_cache);
        assert_eq!(engine.cache_stats().wear_cache_size, 1);
        assert_eq!(engine.cache_stats().cost_cache_size, 1);

        engine.clear_cache();
        assert_eq!(engine.cache_stats().wear_cache_size, 0);
    }

    #[test]
    fn test_cache_bounded_by_capacity() {
        let mut engine = CachedCalculationEngine::new(3);
        for i in 0..5 {
            let mut strategy = scenario1();
            strategy.total_hours = 100000.0 + i as f64 * 1000.0;
            engine.accumulate_cost(&strategy);
        }
        assert_eq!(engine.cache_stats().cost_cache_size, 3);
    }
}
