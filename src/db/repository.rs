//! Database repository for CRUD operations.
//!
//! Every entity follows the same pattern: list with a documented
//! deterministic order, get by id, insert, read-merge-write partial update,
//! delete. Updates are last-write-wins; relations are soft references
//! filtered by column, never joined.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    Activity, AdminUser, Article, AudioMessage, Author, Category, Coordinator,
    CreateActivityRequest, CreateArticleRequest, CreateAudioMessageFields, CreateAuthorRequest,
    CreateCategoryRequest, CreateCoordinatorRequest, CreateMemoryRequest, CreateMessageRequest,
    CreatePastorRequest, Memory, Message, Pastor, UpdateActivityRequest, UpdateArticleRequest,
    UpdateAudioMessageRequest, UpdateAuthorRequest, UpdateCategoryRequest,
    UpdateCoordinatorRequest, UpdateMemoryRequest, UpdateMessageRequest, UpdatePastorRequest,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== ACTIVITY OPERATIONS ====================

    /// List all activities, newest first.
    pub async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, date, description, created_at, updated_at FROM activities ORDER BY created_at DESC, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(activity_from_row).collect())
    }

    /// Get an activity by ID.
    pub async fn get_activity(&self, id: &str) -> Result<Option<Activity>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, date, description, created_at, updated_at FROM activities WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(activity_from_row))
    }

    /// Create a new activity.
    pub async fn create_activity(
        &self,
        request: &CreateActivityRequest,
    ) -> Result<Activity, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO activities (id, name, date, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.date)
        .bind(&request.description)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Activity {
            id,
            name: request.name.clone(),
            date: request.date.clone(),
            description: request.description.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a partial update to an activity.
    pub async fn update_activity(
        &self,
        id: &str,
        request: &UpdateActivityRequest,
    ) -> Result<Activity, AppError> {
        let existing = self
            .get_activity(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let name = request.name.as_ref().unwrap_or(&existing.name);
        let date = request.date.as_ref().unwrap_or(&existing.date);
        let description = request.description.as_ref().unwrap_or(&existing.description);

        let result = sqlx::query(
            "UPDATE activities SET name = ?, date = ?, description = ?, updated_at = ? WHERE id = ?",
        )
        .bind(name)
        .bind(date)
        .bind(description)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Activity {} not found", id)));
        }

        Ok(Activity {
            id: id.to_string(),
            name: name.clone(),
            date: date.clone(),
            description: description.clone(),
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete an activity and cascade-delete its memories in one transaction.
    pub async fn delete_activity(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Activity {} not found", id)));
        }

        sqlx::query("DELETE FROM memories WHERE activity_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // ==================== ARTICLE OPERATIONS ====================

    /// Count all articles (pagination totals).
    pub async fn count_articles(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM articles")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }

    /// List one page of articles, newest first.
    pub async fn list_articles_page(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Article>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, author_id, text, date, display_image, read_time, created_at, updated_at
               FROM articles ORDER BY created_at DESC, id LIMIT ? OFFSET ?"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(article_from_row).collect())
    }

    /// List all articles written by one author, newest first.
    pub async fn list_articles_by_author(
        &self,
        author_id: &str,
    ) -> Result<Vec<Article>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, author_id, text, date, display_image, read_time, created_at, updated_at
               FROM articles WHERE author_id = ? ORDER BY created_at DESC, id"#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(article_from_row).collect())
    }

    /// Get an article by ID.
    pub async fn get_article(&self, id: &str) -> Result<Option<Article>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, author_id, text, date, display_image, read_time, created_at, updated_at
               FROM articles WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(article_from_row))
    }

    /// Create a new article.
    pub async fn create_article(
        &self,
        request: &CreateArticleRequest,
    ) -> Result<Article, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO articles (id, title, author_id, text, date, display_image, read_time, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.author_id)
        .bind(&request.text)
        .bind(&request.date)
        .bind(&request.display_image)
        .bind(request.read_time)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Article {
            id,
            title: request.title.clone(),
            author_id: request.author_id.clone(),
            text: request.text.clone(),
            date: request.date.clone(),
            display_image: request.display_image.clone(),
            read_time: request.read_time,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a partial update to an article.
    pub async fn update_article(
        &self,
        id: &str,
        request: &UpdateArticleRequest,
    ) -> Result<Article, AppError> {
        let existing = self
            .get_article(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Article {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let title = request.title.as_ref().unwrap_or(&existing.title);
        let author_id = request.author_id.as_ref().unwrap_or(&existing.author_id);
        let text = request.text.as_ref().unwrap_or(&existing.text);
        let date = request.date.as_ref().unwrap_or(&existing.date);
        let display_image = request
            .display_image
            .clone()
            .or(existing.display_image.clone());
        let read_time = request.read_time.or(existing.read_time);

        let result = sqlx::query(
            r#"UPDATE articles SET title = ?, author_id = ?, text = ?, date = ?, display_image = ?, read_time = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(title)
        .bind(author_id)
        .bind(text)
        .bind(date)
        .bind(&display_image)
        .bind(read_time)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Article {} not found", id)));
        }

        Ok(Article {
            id: id.to_string(),
            title: title.clone(),
            author_id: author_id.clone(),
            text: text.clone(),
            date: date.clone(),
            display_image,
            read_time,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete an article.
    pub async fn delete_article(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Article {} not found", id)));
        }

        Ok(())
    }

    // ==================== AUTHOR OPERATIONS ====================

    /// List all authors, alphabetically by last name.
    pub async fn list_authors(&self) -> Result<Vec<Author>, AppError> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, profile_image, created_at, updated_at FROM authors ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(author_from_row).collect())
    }

    /// Get an author by ID.
    pub async fn get_author(&self, id: &str) -> Result<Option<Author>, AppError> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, profile_image, created_at, updated_at FROM authors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(author_from_row))
    }

    /// Create a new author.
    pub async fn create_author(&self, request: &CreateAuthorRequest) -> Result<Author, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO authors (id, first_name, last_name, profile_image, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.profile_image)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Author {
            id,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            profile_image: request.profile_image.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a partial update to an author.
    pub async fn update_author(
        &self,
        id: &str,
        request: &UpdateAuthorRequest,
    ) -> Result<Author, AppError> {
        let existing = self
            .get_author(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let first_name = request.first_name.as_ref().unwrap_or(&existing.first_name);
        let last_name = request.last_name.as_ref().unwrap_or(&existing.last_name);
        let profile_image = request
            .profile_image
            .clone()
            .or(existing.profile_image.clone());

        let result = sqlx::query(
            "UPDATE authors SET first_name = ?, last_name = ?, profile_image = ?, updated_at = ? WHERE id = ?",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(&profile_image)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }

        Ok(Author {
            id: id.to_string(),
            first_name: first_name.clone(),
            last_name: last_name.clone(),
            profile_image,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete an author.
    pub async fn delete_author(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }

        Ok(())
    }

    // ==================== COORDINATOR OPERATIONS ====================

    /// List all coordinators, alphabetically.
    pub async fn list_coordinators(&self) -> Result<Vec<Coordinator>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, name, occupation, phone_number, email, image_url, about, is_featured, created_at, updated_at
               FROM coordinators ORDER BY name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(coordinator_from_row).collect())
    }

    /// List featured coordinators only, alphabetically.
    pub async fn list_featured_coordinators(&self) -> Result<Vec<Coordinator>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, name, occupation, phone_number, email, image_url, about, is_featured, created_at, updated_at
               FROM coordinators WHERE is_featured = 1 ORDER BY name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(coordinator_from_row).collect())
    }

    /// Get a coordinator by ID.
    pub async fn get_coordinator(&self, id: &str) -> Result<Option<Coordinator>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, name, occupation, phone_number, email, image_url, about, is_featured, created_at, updated_at
               FROM coordinators WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(coordinator_from_row))
    }

    /// Create a new coordinator.
    pub async fn create_coordinator(
        &self,
        request: &CreateCoordinatorRequest,
    ) -> Result<Coordinator, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO coordinators (id, name, occupation, phone_number, email, image_url, about, is_featured, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.occupation)
        .bind(&request.phone_number)
        .bind(&request.email)
        .bind(&request.image_url)
        .bind(&request.about)
        .bind(request.is_featured as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Coordinator {
            id,
            name: request.name.clone(),
            occupation: request.occupation.clone(),
            phone_number: request.phone_number.clone(),
            email: request.email.clone(),
            image_url: request.image_url.clone(),
            about: request.about.clone(),
            is_featured: request.is_featured,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a partial update to a coordinator.
    pub async fn update_coordinator(
        &self,
        id: &str,
        request: &UpdateCoordinatorRequest,
    ) -> Result<Coordinator, AppError> {
        let existing = self
            .get_coordinator(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Coordinator {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let name = request.name.as_ref().unwrap_or(&existing.name);
        let occupation = request.occupation.clone().or(existing.occupation.clone());
        let phone_number = request
            .phone_number
            .clone()
            .or(existing.phone_number.clone());
        let email = request.email.clone().or(existing.email.clone());
        let image_url = request.image_url.clone().or(existing.image_url.clone());
        let about = request.about.clone().or(existing.about.clone());
        let is_featured = request.is_featured.unwrap_or(existing.is_featured);

        let result = sqlx::query(
            r#"UPDATE coordinators SET name = ?, occupation = ?, phone_number = ?, email = ?, image_url = ?, about = ?, is_featured = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(name)
        .bind(&occupation)
        .bind(&phone_number)
        .bind(&email)
        .bind(&image_url)
        .bind(&about)
        .bind(is_featured as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Coordinator {} not found", id)));
        }

        Ok(Coordinator {
            id: id.to_string(),
            name: name.clone(),
            occupation,
            phone_number,
            email,
            image_url,
            about,
            is_featured,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a coordinator.
    pub async fn delete_coordinator(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM coordinators WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Coordinator {} not found", id)));
        }

        Ok(())
    }

    // ==================== MEMORY OPERATIONS ====================

    /// List all memories, newest first.
    pub async fn list_memories(&self) -> Result<Vec<Memory>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, image_url, height, width, img_type, activity_id, created_at, updated_at
               FROM memories ORDER BY created_at DESC, id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(memory_from_row).collect())
    }

    /// List all memories attached to one activity, newest first.
    pub async fn list_memories_by_activity(
        &self,
        activity_id: &str,
    ) -> Result<Vec<Memory>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, image_url, height, width, img_type, activity_id, created_at, updated_at
               FROM memories WHERE activity_id = ? ORDER BY created_at DESC, id"#,
        )
        .bind(activity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(memory_from_row).collect())
    }

    /// Get a memory by ID.
    pub async fn get_memory(&self, id: &str) -> Result<Option<Memory>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, image_url, height, width, img_type, activity_id, created_at, updated_at
               FROM memories WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(memory_from_row))
    }

    /// Create a new memory.
    pub async fn create_memory(&self, request: &CreateMemoryRequest) -> Result<Memory, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO memories (id, image_url, height, width, img_type, activity_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.image_url)
        .bind(request.height)
        .bind(request.width)
        .bind(&request.img_type)
        .bind(&request.activity_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Memory {
            id,
            image_url: request.image_url.clone(),
            height: request.height,
            width: request.width,
            img_type: request.img_type.clone(),
            activity_id: request.activity_id.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a partial update to a memory.
    pub async fn update_memory(
        &self,
        id: &str,
        request: &UpdateMemoryRequest,
    ) -> Result<Memory, AppError> {
        let existing = self
            .get_memory(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Memory {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let image_url = request.image_url.as_ref().unwrap_or(&existing.image_url);
        let height = request.height.unwrap_or(existing.height);
        let width = request.width.unwrap_or(existing.width);
        let img_type = request.img_type.as_ref().unwrap_or(&existing.img_type);
        let activity_id = request
            .activity_id
            .as_ref()
            .unwrap_or(&existing.activity_id);

        let result = sqlx::query(
            r#"UPDATE memories SET image_url = ?, height = ?, width = ?, img_type = ?, activity_id = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(image_url)
        .bind(height)
        .bind(width)
        .bind(img_type)
        .bind(activity_id)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Memory {} not found", id)));
        }

        Ok(Memory {
            id: id.to_string(),
            image_url: image_url.clone(),
            height,
            width,
            img_type: img_type.clone(),
            activity_id: activity_id.clone(),
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a memory.
    pub async fn delete_memory(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM memories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Memory {} not found", id)));
        }

        Ok(())
    }

    /// Bulk-delete every memory attached to one activity. Returns the count
    /// removed; zero matches is not an error.
    pub async fn delete_memories_by_activity(
        &self,
        activity_id: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM memories WHERE activity_id = ?")
            .bind(activity_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ==================== AUDIO MESSAGE OPERATIONS ====================

    /// List all audio messages, newest first.
    pub async fn list_audio_messages(&self) -> Result<Vec<AudioMessage>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, description, audio_url, speaker, date, duration, category, thumbnail, created_at, updated_at
               FROM audio_messages ORDER BY created_at DESC, id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(audio_message_from_row).collect())
    }

    /// List audio messages tagged with one category name, newest first.
    pub async fn list_audio_messages_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<AudioMessage>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, description, audio_url, speaker, date, duration, category, thumbnail, created_at, updated_at
               FROM audio_messages WHERE category = ? ORDER BY created_at DESC, id"#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(audio_message_from_row).collect())
    }

    /// Get an audio message by ID.
    pub async fn get_audio_message(&self, id: &str) -> Result<Option<AudioMessage>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, description, audio_url, speaker, date, duration, category, thumbnail, created_at, updated_at
               FROM audio_messages WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(audio_message_from_row))
    }

    /// Create a new audio message. The audio and thumbnail URLs come from the
    /// storage adapter, which has already handled the uploaded files.
    pub async fn create_audio_message(
        &self,
        fields: &CreateAudioMessageFields,
        audio_url: &str,
        thumbnail: Option<String>,
    ) -> Result<AudioMessage, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO audio_messages (id, title, description, audio_url, speaker, date, duration, category, thumbnail, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(audio_url)
        .bind(&fields.speaker)
        .bind(&fields.date)
        .bind(&fields.duration)
        .bind(&fields.category)
        .bind(&thumbnail)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(AudioMessage {
            id,
            title: fields.title.clone(),
            description: fields.description.clone(),
            audio_url: audio_url.to_string(),
            speaker: fields.speaker.clone(),
            date: fields.date.clone(),
            duration: fields.duration.clone(),
            category: fields.category.clone(),
            thumbnail,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a partial update to an audio message's metadata.
    pub async fn update_audio_message(
        &self,
        id: &str,
        request: &UpdateAudioMessageRequest,
    ) -> Result<AudioMessage, AppError> {
        let existing = self
            .get_audio_message(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Audio message {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let title = request.title.as_ref().unwrap_or(&existing.title);
        let description = request.description.clone().or(existing.description.clone());
        let audio_url = request.audio_url.as_ref().unwrap_or(&existing.audio_url);
        let speaker = request.speaker.as_ref().unwrap_or(&existing.speaker);
        let date = request.date.as_ref().unwrap_or(&existing.date);
        let duration = request.duration.clone().or(existing.duration.clone());
        let category = request.category.as_ref().unwrap_or(&existing.category);
        let thumbnail = request.thumbnail.clone().or(existing.thumbnail.clone());

        let result = sqlx::query(
            r#"UPDATE audio_messages SET title = ?, description = ?, audio_url = ?, speaker = ?, date = ?, duration = ?, category = ?, thumbnail = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(title)
        .bind(&description)
        .bind(audio_url)
        .bind(speaker)
        .bind(date)
        .bind(&duration)
        .bind(category)
        .bind(&thumbnail)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Audio message {} not found", id)));
        }

        Ok(AudioMessage {
            id: id.to_string(),
            title: title.clone(),
            description,
            audio_url: audio_url.clone(),
            speaker: speaker.clone(),
            date: date.clone(),
            duration,
            category: category.clone(),
            thumbnail,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete an audio message.
    pub async fn delete_audio_message(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM audio_messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Audio message {} not found", id)));
        }

        Ok(())
    }

    // ==================== CATEGORY OPERATIONS ====================

    /// List active categories in dropdown order.
    pub async fn list_active_categories(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, name, description, sort_order, is_active, created_at, updated_at
               FROM categories WHERE is_active = 1 ORDER BY sort_order, name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    /// List all categories including inactive ones (admin view).
    pub async fn list_all_categories(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, name, description, sort_order, is_active, created_at, updated_at
               FROM categories ORDER BY sort_order, name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    /// Get a category by ID.
    pub async fn get_category(&self, id: &str) -> Result<Option<Category>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, name, description, sort_order, is_active, created_at, updated_at
               FROM categories WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(category_from_row))
    }

    /// Create a new category.
    pub async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<Category, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO categories (id, name, description, sort_order, is_active, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.sort_order)
        .bind(request.is_active as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Category {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            sort_order: request.sort_order,
            is_active: request.is_active,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a partial update to a category.
    pub async fn update_category(
        &self,
        id: &str,
        request: &UpdateCategoryRequest,
    ) -> Result<Category, AppError> {
        let existing = self
            .get_category(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let name = request.name.as_ref().unwrap_or(&existing.name);
        let description = request.description.clone().or(existing.description.clone());
        let sort_order = request.sort_order.unwrap_or(existing.sort_order);
        let is_active = request.is_active.unwrap_or(existing.is_active);

        let result = sqlx::query(
            r#"UPDATE categories SET name = ?, description = ?, sort_order = ?, is_active = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(name)
        .bind(&description)
        .bind(sort_order)
        .bind(is_active as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        Ok(Category {
            id: id.to_string(),
            name: name.clone(),
            description,
            sort_order,
            is_active,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a category. Audio messages keep whatever category name they
    /// carry; orphaned tags are accepted.
    pub async fn delete_category(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        Ok(())
    }

    // ==================== MESSAGE OPERATIONS ====================

    /// List published messages, most recently published first.
    pub async fn list_published_messages(&self) -> Result<Vec<Message>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, content, coordinator_id, date_published, is_published, excerpt, created_at, updated_at
               FROM messages WHERE is_published = 1
               ORDER BY date_published IS NULL, date_published DESC, created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(message_from_row).collect())
    }

    /// List all messages including drafts (admin view).
    pub async fn list_all_messages(&self) -> Result<Vec<Message>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, content, coordinator_id, date_published, is_published, excerpt, created_at, updated_at
               FROM messages
               ORDER BY date_published IS NULL, date_published DESC, created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(message_from_row).collect())
    }

    /// List published messages from one coordinator.
    pub async fn list_published_messages_by_coordinator(
        &self,
        coordinator_id: &str,
    ) -> Result<Vec<Message>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, content, coordinator_id, date_published, is_published, excerpt, created_at, updated_at
               FROM messages WHERE coordinator_id = ? AND is_published = 1
               ORDER BY date_published IS NULL, date_published DESC, created_at DESC"#,
        )
        .bind(coordinator_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(message_from_row).collect())
    }

    /// Get a message by ID, published or not. Publication gating for the
    /// public surface happens in the handler.
    pub async fn get_message(&self, id: &str) -> Result<Option<Message>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, content, coordinator_id, date_published, is_published, excerpt, created_at, updated_at
               FROM messages WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(message_from_row))
    }

    /// Create a new message.
    pub async fn create_message(
        &self,
        request: &CreateMessageRequest,
    ) -> Result<Message, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO messages (id, title, content, coordinator_id, date_published, is_published, excerpt, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.content)
        .bind(&request.coordinator_id)
        .bind(&request.date_published)
        .bind(request.is_published as i32)
        .bind(&request.excerpt)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Message {
            id,
            title: request.title.clone(),
            content: request.content.clone(),
            coordinator_id: request.coordinator_id.clone(),
            date_published: request.date_published.clone(),
            is_published: request.is_published,
            excerpt: request.excerpt.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a partial update to a message.
    pub async fn update_message(
        &self,
        id: &str,
        request: &UpdateMessageRequest,
    ) -> Result<Message, AppError> {
        let existing = self
            .get_message(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Message {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let title = request.title.as_ref().unwrap_or(&existing.title);
        let content = request.content.as_ref().unwrap_or(&existing.content);
        let coordinator_id = request
            .coordinator_id
            .as_ref()
            .unwrap_or(&existing.coordinator_id);
        let date_published = request
            .date_published
            .clone()
            .or(existing.date_published.clone());
        let is_published = request.is_published.unwrap_or(existing.is_published);
        let excerpt = request.excerpt.clone().or(existing.excerpt.clone());

        let result = sqlx::query(
            r#"UPDATE messages SET title = ?, content = ?, coordinator_id = ?, date_published = ?, is_published = ?, excerpt = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(title)
        .bind(content)
        .bind(coordinator_id)
        .bind(&date_published)
        .bind(is_published as i32)
        .bind(&excerpt)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Message {} not found", id)));
        }

        Ok(Message {
            id: id.to_string(),
            title: title.clone(),
            content: content.clone(),
            coordinator_id: coordinator_id.clone(),
            date_published,
            is_published,
            excerpt,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a message.
    pub async fn delete_message(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Message {} not found", id)));
        }

        Ok(())
    }

    // ==================== PASTOR OPERATIONS ====================

    /// List active pastors, alphabetically.
    pub async fn list_active_pastors(&self) -> Result<Vec<Pastor>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, name, title, welcome_message, image, is_active, created_at, updated_at
               FROM pastors WHERE is_active = 1 ORDER BY name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(pastor_from_row).collect())
    }

    /// List all pastors including inactive ones (admin view).
    pub async fn list_all_pastors(&self) -> Result<Vec<Pastor>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, name, title, welcome_message, image, is_active, created_at, updated_at
               FROM pastors ORDER BY name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(pastor_from_row).collect())
    }

    /// Get a pastor by ID.
    pub async fn get_pastor(&self, id: &str) -> Result<Option<Pastor>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, name, title, welcome_message, image, is_active, created_at, updated_at
               FROM pastors WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(pastor_from_row))
    }

    /// Create a new pastor.
    pub async fn create_pastor(&self, request: &CreatePastorRequest) -> Result<Pastor, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO pastors (id, name, title, welcome_message, image, is_active, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.title)
        .bind(&request.welcome_message)
        .bind(&request.image)
        .bind(request.is_active as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Pastor {
            id,
            name: request.name.clone(),
            title: request.title.clone(),
            welcome_message: request.welcome_message.clone(),
            image: request.image.clone(),
            is_active: request.is_active,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a partial update to a pastor.
    pub async fn update_pastor(
        &self,
        id: &str,
        request: &UpdatePastorRequest,
    ) -> Result<Pastor, AppError> {
        let existing = self
            .get_pastor(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Pastor {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let name = request.name.as_ref().unwrap_or(&existing.name);
        let title = request.title.as_ref().unwrap_or(&existing.title);
        let welcome_message = request
            .welcome_message
            .clone()
            .or(existing.welcome_message.clone());
        let image = request.image.clone().or(existing.image.clone());
        let is_active = request.is_active.unwrap_or(existing.is_active);

        let result = sqlx::query(
            r#"UPDATE pastors SET name = ?, title = ?, welcome_message = ?, image = ?, is_active = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(name)
        .bind(title)
        .bind(&welcome_message)
        .bind(&image)
        .bind(is_active as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Pastor {} not found", id)));
        }

        Ok(Pastor {
            id: id.to_string(),
            name: name.clone(),
            title: title.clone(),
            welcome_message,
            image,
            is_active,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a pastor.
    pub async fn delete_pastor(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pastors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Pastor {} not found", id)));
        }

        Ok(())
    }

    // ==================== ADMIN OPERATIONS ====================

    /// Count stored admin accounts. The setup endpoint only works at zero.
    pub async fn count_admins(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM admins")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }

    /// Look up an admin account by email.
    pub async fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError> {
        let row = sqlx::query(
            "SELECT id, email, name, role, password_hash, created_at FROM admins WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(admin_from_row))
    }

    /// Create an admin account from an already-hashed password.
    pub async fn create_admin(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<AdminUser, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let role = "admin";

        sqlx::query(
            "INSERT INTO admins (id, email, name, role, password_hash, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(email)
        .bind(name)
        .bind(role)
        .bind(password_hash)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(AdminUser {
            id,
            email: email.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
        })
    }
}

// Helper functions for row conversion

fn activity_from_row(row: &sqlx::sqlite::SqliteRow) -> Activity {
    Activity {
        id: row.get("id"),
        name: row.get("name"),
        date: row.get("date"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn article_from_row(row: &sqlx::sqlite::SqliteRow) -> Article {
    Article {
        id: row.get("id"),
        title: row.get("title"),
        author_id: row.get("author_id"),
        text: row.get("text"),
        date: row.get("date"),
        display_image: row.get("display_image"),
        read_time: row.get("read_time"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn author_from_row(row: &sqlx::sqlite::SqliteRow) -> Author {
    Author {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        profile_image: row.get("profile_image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn coordinator_from_row(row: &sqlx::sqlite::SqliteRow) -> Coordinator {
    let is_featured: i32 = row.get("is_featured");
    Coordinator {
        id: row.get("id"),
        name: row.get("name"),
        occupation: row.get("occupation"),
        phone_number: row.get("phone_number"),
        email: row.get("email"),
        image_url: row.get("image_url"),
        about: row.get("about"),
        is_featured: is_featured != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn memory_from_row(row: &sqlx::sqlite::SqliteRow) -> Memory {
    Memory {
        id: row.get("id"),
        image_url: row.get("image_url"),
        height: row.get("height"),
        width: row.get("width"),
        img_type: row.get("img_type"),
        activity_id: row.get("activity_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn audio_message_from_row(row: &sqlx::sqlite::SqliteRow) -> AudioMessage {
    AudioMessage {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        audio_url: row.get("audio_url"),
        speaker: row.get("speaker"),
        date: row.get("date"),
        duration: row.get("duration"),
        category: row.get("category"),
        thumbnail: row.get("thumbnail"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn category_from_row(row: &sqlx::sqlite::SqliteRow) -> Category {
    let is_active: i32 = row.get("is_active");
    Category {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        sort_order: row.get("sort_order"),
        is_active: is_active != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn message_from_row(row: &sqlx::sqlite::SqliteRow) -> Message {
    let is_published: i32 = row.get("is_published");
    Message {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        coordinator_id: row.get("coordinator_id"),
        date_published: row.get("date_published"),
        is_published: is_published != 0,
        excerpt: row.get("excerpt"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn pastor_from_row(row: &sqlx::sqlite::SqliteRow) -> Pastor {
    let is_active: i32 = row.get("is_active");
    Pastor {
        id: row.get("id"),
        name: row.get("name"),
        title: row.get("title"),
        welcome_message: row.get("welcome_message"),
        image: row.get("image"),
        is_active: is_active != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn admin_from_row(row: &sqlx::sqlite::SqliteRow) -> AdminUser {
    AdminUser {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
        role: row.get("role"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}
