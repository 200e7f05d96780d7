use rand::Rng;
use ui_swr_kit::{ButtonSize, ButtonVariant, EntryTimestamps, ResolutionRequest};

/// Generate resolution requests for the button schema.
pub struct RequestGenerator {
    count: usize,
}

impl RequestGenerator {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Requests that select nothing, so every group uses its default.
    pub fn defaults(&self) -> Vec<ResolutionRequest> {
        (0..self.count).map(|_| ResolutionRequest::new()).collect()
    }

    /// Requests with random valid selections and an occasional extra class.
    pub fn uniform_random(&self) -> Vec<ResolutionRequest> {
        let mut rng = rand::thread_rng();
        (0..self.count)
            .map(|i| {
                let variant = ButtonVariant::ALL[rng.gen_range(0..ButtonVariant::ALL.len())];
                let size = ButtonSize::ALL[rng.gen_range(0..ButtonSize::ALL.len())];
                let request = ResolutionRequest::new()
                    .select("variant", variant.as_str())
                    .select("size", size.as_str());
                if rng.gen_bool(0.3) {
                    request.extra(format!("mt-{}", i % 8))
                } else {
                    request
                }
            })
            .collect()
    }

    /// Requests where roughly `invalid_ratio` of selections are unknown choices.
    pub fn mixed(&self, invalid_ratio: f64) -> Vec<ResolutionRequest> {
        let mut rng = rand::thread_rng();
        (0..self.count)
            .map(|_| {
                if rng.gen_bool(invalid_ratio) {
                    ResolutionRequest::new().select("variant", "nonexistent")
                } else {
                    ResolutionRequest::new().select("size", "lg")
                }
            })
            .collect()
    }
}

/// Entry timestamps spread over the last `span_ms` before `now_ms`.
pub fn entries(count: usize, now_ms: i64, span_ms: i64) -> Vec<EntryTimestamps> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let fetched = now_ms - rng.gen_range(0..span_ms);
            let mut entry = EntryTimestamps::fetched(fetched);
            entry.touch(rng.gen_range(fetched..=now_ms));
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_request_generator() {
        use super::RequestGenerator;

        let generator = RequestGenerator::new(50);
        assert_eq!(generator.defaults().len(), 50);
        assert_eq!(generator.uniform_random().len(), 50);
        assert_eq!(generator.mixed(0.5).len(), 50);
    }

    #[test]
    fn test_entries_are_in_the_past() {
        let entries = super::entries(100, 1_000_000, 10_000);
        assert!(entries.iter().all(|e| e.last_fetched_at <= 1_000_000));
        assert!(entries.iter().all(|e| e.last_accessed_at >= e.last_fetched_at));
    }
}
