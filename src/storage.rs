use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use chrono::Utc;

use crate::domain::{NewSubmission, Submission};

#[derive(Debug)]
struct Inner {
    next_id: u64,
    submissions: HashMap<u64, Submission>,
}

/// 内存中的提交存储，归 `AppState` 所有
///
/// id 从 1 开始递增且不会复用，进程重启后数据全部丢失
#[derive(Debug)]
pub struct SubmissionStore {
    inner: Mutex<Inner>,
}

impl Default for SubmissionStore {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                submissions: HashMap::new(),
            }),
        }
    }
}

impl SubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // 持锁期间不会出现写了一半的 `Inner`，锁中毒后数据仍然可用
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[tracing::instrument(name = "保存提交", skip(self, new_submission))]
    pub fn create(&self, new_submission: NewSubmission) -> Submission {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        let submission = Submission {
            id,
            email: new_submission.email,
            horoscope_sign: new_submission.horoscope_sign,
            mood: new_submission.mood,
            created_at: Utc::now(),
        };
        inner.submissions.insert(id, submission.clone());
        tracing::info!(submission_id = id, "提交已保存");
        submission
    }

    pub fn get(&self, id: u64) -> Option<Submission> {
        self.lock().submissions.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
