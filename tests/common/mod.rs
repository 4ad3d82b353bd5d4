//! Shared stub providers and fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use mind_mentor::cache::CacheStore;
use mind_mentor::error::{AppError, Result};
use mind_mentor::models::{SearchHit, SearchResult};
use mind_mentor::providers::{CompletionProvider, CompletionRequest, SearchProvider, SearchQuery};
use mind_mentor::StudyService;

pub const TTL: Duration = Duration::from_secs(1800);

// == Fixtures ==

pub fn resources_json(count: usize) -> String {
    let resources: Vec<_> = (0..count)
        .map(|n| {
            json!({
                "title": format!("Course {n}"),
                "url": format!("https://www.khanacademy.org/course/{n}"),
                "description": "Covers the fundamentals with exercises.",
                "benefits": ["Free", "Self-paced"],
                "format": "Video Course",
                "difficulty_level": "Beginner"
            })
        })
        .collect();
    json!({ "resources": resources }).to_string()
}

pub fn plan_json(subject: &str, exam_date: &str) -> String {
    json!({
        "overview": {"subject": subject, "duration": "30 days", "examDate": exam_date},
        "weeklyPlans": [
            {
                "week": "Week 1",
                "goals": ["Vectors", "Matrices"],
                "dailyTasks": [
                    {"day": "Day 1", "tasks": ["Read chapter 1"], "duration": "2 hours"},
                    {"day": "Day 2", "tasks": ["Problem set 1"], "duration": "3 hours"}
                ]
            }
        ],
        "recommendations": ["Review daily"]
    })
    .to_string()
}

pub fn sample_search() -> SearchResult {
    SearchResult {
        answer: "Khan Academy has a full course.".to_string(),
        results: vec![SearchHit {
            title: "Linear Algebra".to_string(),
            url: "https://www.khanacademy.org/math/linear-algebra".to_string(),
            snippet: "Vectors and spaces".to_string(),
        }],
    }
}

// == Stub Search Provider ==

pub struct StubSearch {
    calls: AtomicUsize,
    fail: bool,
}

impl StubSearch {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, _query: &SearchQuery) -> Result<SearchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Fetch("search unavailable".to_string()));
        }
        Ok(sample_search())
    }
}

// == Stub Completion Provider ==

type Responder = Box<dyn Fn(&CompletionRequest) -> Result<String> + Send + Sync>;

pub struct StubCompletion {
    calls: AtomicUsize,
    responder: Responder,
}

impl StubCompletion {
    pub fn new(responder: impl Fn(&CompletionRequest) -> Result<String> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            responder: Box::new(responder),
        })
    }

    /// Always replies with `text`.
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn failing() -> Arc<Self> {
        Self::new(|_| Err(AppError::Fetch("completion unavailable".to_string())))
    }

    /// Answers plan prompts with a plan and everything else with five resources.
    pub fn well_behaved() -> Arc<Self> {
        Self::new(|request| {
            if request.user_prompt.contains("weeklyPlans") {
                Ok(plan_json("Linear Algebra", "2025-06-01"))
            } else {
                Ok(resources_json(5))
            }
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for StubCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.responder)(request)
    }
}

pub fn service(search: Arc<StubSearch>, completion: Arc<StubCompletion>) -> StudyService {
    StudyService::new(CacheStore::shared(TTL), search, completion, TTL)
}
