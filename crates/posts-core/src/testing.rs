//! In-memory port implementations for tests of this crate and its dependents.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Caller, DiscussionCategory, NewTopic, Post, Roles, Topic};
use crate::error::{DiscussionError, IdentityError, RepoError};
use crate::ports::{DiscussionClient, IdentityClient, PostRepository, PostTransaction};

pub fn sample_post(owner_id: &str, topic_id: i64) -> Post {
    Post {
        id: Uuid::new_v4(),
        title: format!("Post on topic {topic_id}"),
        message: "Test post message".into(),
        owner_id: owner_id.into(),
        category_id: 1,
        category_name: Some("Test Category".into()),
        topic_id,
        created_at: Utc::now(),
        reply_count: None,
        replies: None,
    }
}

#[derive(Debug, Clone, Copy)]
pub enum InsertFailure {
    Constraint,
    Query,
}

#[derive(Default)]
struct Tables {
    posts: Vec<Post>,
    /// Discourse linkage rows, keyed by post id.
    linkages: Vec<Uuid>,
}

/// Repository keeping committed rows in memory.
#[derive(Default)]
pub struct FakeRepository {
    tables: Arc<Mutex<Tables>>,
    insert_failure: Option<InsertFailure>,
    fail_reads: bool,
    begins: AtomicUsize,
    deletes: AtomicUsize,
}

impl FakeRepository {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let linkages = posts.iter().map(|p| p.id).collect();
        Self {
            tables: Arc::new(Mutex::new(Tables { posts, linkages })),
            ..Self::default()
        }
    }

    pub fn failing_insert(mut self, failure: InsertFailure) -> Self {
        self.insert_failure = Some(failure);
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn post_count(&self) -> usize {
        self.tables.lock().unwrap().posts.len()
    }

    pub fn linkage_count(&self) -> usize {
        self.tables.lock().unwrap().linkages.len()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.tables.lock().unwrap().posts.iter().any(|p| p.id == id)
    }

    pub fn begins(&self) -> usize {
        self.begins.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    fn check_reads(&self) -> Result<(), RepoError> {
        if self.fail_reads {
            return Err(RepoError::Connection("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for FakeRepository {
    async fn begin(&self) -> Result<Box<dyn PostTransaction>, RepoError> {
        self.begins.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeTransaction {
            tables: self.tables.clone(),
            pending: Vec::new(),
            insert_failure: self.insert_failure,
        }))
    }

    async fn find_all(&self, categories: Option<&[i32]>) -> Result<Vec<Post>, RepoError> {
        self.check_reads()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .posts
            .iter()
            .filter(|p| categories.is_none_or(|ids| ids.contains(&p.category_id)))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.check_reads()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock().unwrap();
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        if tables.posts.len() == before {
            return Err(RepoError::NotFound);
        }
        tables.linkages.retain(|asset| *asset != id);
        Ok(())
    }

    async fn count_by_owner(&self, owner_id: &str) -> Result<u64, RepoError> {
        self.check_reads()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter().filter(|p| p.is_owned_by(owner_id)).count() as u64)
    }
}

struct FakeTransaction {
    tables: Arc<Mutex<Tables>>,
    pending: Vec<Post>,
    insert_failure: Option<InsertFailure>,
}

#[async_trait]
impl PostTransaction for FakeTransaction {
    async fn insert(&mut self, post: Post) -> Result<Post, RepoError> {
        match self.insert_failure {
            Some(InsertFailure::Constraint) => Err(RepoError::Constraint(
                "duplicate key value violates unique constraint \"posts_title_key\"".into(),
            )),
            Some(InsertFailure::Query) => Err(RepoError::Query("syntax error".into())),
            None => {
                self.pending.push(post.clone());
                Ok(post)
            }
        }
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let mut tables = self.tables.lock().unwrap();
        for post in self.pending {
            tables.linkages.push(post.id);
            tables.posts.push(post);
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepoError> {
        Ok(())
    }
}

/// What `create_topic` answers.
#[derive(Debug, Clone)]
pub enum TopicOutcome {
    Created(i64),
    Rejected(String),
    Unreachable,
}

/// Discussion subsystem stub with call counters.
pub struct FakeDiscussion {
    category: Option<DiscussionCategory>,
    topics: HashMap<i64, Topic>,
    topic_outcome: TopicOutcome,
    category_calls: AtomicUsize,
    create_calls: AtomicUsize,
    created: Mutex<Vec<NewTopic>>,
}

impl Default for FakeDiscussion {
    fn default() -> Self {
        Self {
            category: None,
            topics: HashMap::new(),
            topic_outcome: TopicOutcome::Created(1),
            category_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
        }
    }
}

impl FakeDiscussion {
    pub fn with_category(mut self, category: DiscussionCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topics.insert(topic.id, topic);
        self
    }

    pub fn with_topic_outcome(mut self, outcome: TopicOutcome) -> Self {
        self.topic_outcome = outcome;
        self
    }

    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn created_topics(&self) -> Vec<NewTopic> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiscussionClient for FakeDiscussion {
    async fn ensure_category(
        &self,
        _category_id: Uuid,
    ) -> Result<DiscussionCategory, DiscussionError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        self.category
            .clone()
            .ok_or_else(|| DiscussionError::Communication("service unavailable".into()))
    }

    async fn create_topic(&self, topic: &NewTopic) -> Result<i64, DiscussionError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.created.lock().unwrap().push(topic.clone());
        match &self.topic_outcome {
            TopicOutcome::Created(id) => Ok(*id),
            TopicOutcome::Rejected(msg) => Err(DiscussionError::TopicCreation(msg.clone())),
            TopicOutcome::Unreachable => Err(DiscussionError::Communication(
                "Failed to create topic due to service unavailability".into(),
            )),
        }
    }

    async fn get_topic(&self, topic_id: i64) -> Result<Topic, DiscussionError> {
        self.topics
            .get(&topic_id)
            .cloned()
            .ok_or_else(|| DiscussionError::Communication(format!("topic {topic_id} unavailable")))
    }
}

/// What `current_user_roles` answers.
#[derive(Debug, Clone)]
pub enum RolesOutcome {
    Roles(Vec<&'static str>),
    NotLoggedIn,
    Failure,
}

pub struct FakeIdentity {
    outcome: RolesOutcome,
    calls: AtomicUsize,
}

impl FakeIdentity {
    pub fn new(outcome: RolesOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityClient for FakeIdentity {
    async fn current_user_roles(&self, _caller: &Caller) -> Result<Roles, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            RolesOutcome::Roles(roles) => Ok(roles.iter().collect()),
            RolesOutcome::NotLoggedIn => Err(IdentityError::NotLoggedIn),
            RolesOutcome::Failure => Err(IdentityError::Roles("status 500".into())),
        }
    }
}
