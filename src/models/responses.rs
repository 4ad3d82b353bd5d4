//! Response DTOs for the study API
//!
//! Bodies for the service's own endpoints. Curated resources and plans are
//! returned as their model types directly.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for GET /
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn running() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Mind Mentor API is running".to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_serialize() {
        let json = serde_json::to_value(StatusResponse::running()).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "Mind Mentor API is running");
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let mut stats = CacheStats::new();
        for _ in 0..4 {
            stats.record_hit();
        }
        stats.record_miss();
        stats.set_total_entries(3);

        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.total_entries, 3);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
