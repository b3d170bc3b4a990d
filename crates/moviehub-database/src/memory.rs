//! In-memory store using a Tokio mutex, for tests and single-process runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use moviehub_core::error::AppError;
use moviehub_core::result::AppResult;
use moviehub_entity::movie::{
    CreateMovie, MediaType, Movie, MovieMedia, MovieMediaInput, MovieMetadata, MovieMetadataInput,
    UpdateMovie,
};
use moviehub_entity::movie_file::{CreateMovieFile, MovieFile};
use moviehub_entity::user::{CreateUser, User};

use crate::store::{MovieFileStore, MovieStore, UserStore};

/// Internal state for the memory store.
#[derive(Debug, Default)]
struct InnerState {
    last_id: i64,
    users: BTreeMap<i64, User>,
    usernames: HashMap<String, i64>,
    movies: BTreeMap<i64, Movie>,
    files: BTreeMap<i64, MovieFile>,
}

impl InnerState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn build_media(&mut self, movie_id: i64, input: &[MovieMediaInput]) -> Vec<MovieMedia> {
        let now = Utc::now();
        input
            .iter()
            .map(|item| MovieMedia {
                id: self.next_id(),
                movie_id,
                media_type: item.media_type,
                url: item.url.clone(),
                is_main: item.is_main,
                created_at: now,
                updated_at: now,
            })
            .collect()
    }

    fn build_metadata(
        &mut self,
        movie_id: i64,
        existing: Option<&MovieMetadata>,
        input: &MovieMetadataInput,
    ) -> MovieMetadata {
        let now = Utc::now();
        let (id, created_at) = match existing {
            Some(m) => (m.id, m.created_at),
            None => (self.next_id(), now),
        };
        MovieMetadata {
            id,
            movie_id,
            language: input.language.clone(),
            country: input.country.clone(),
            awards: input.awards.clone(),
            cast_list: input.cast_list.clone(),
            created_at,
            updated_at: now,
        }
    }

    fn live_movie_mut(&mut self, id: i64) -> Option<&mut Movie> {
        self.movies.get_mut(&id).filter(|m| !m.is_deleted())
    }
}

/// In-memory implementation of every store trait.
///
/// Cloning shares the underlying state. Identifiers come from a single
/// counter, so ids are unique across all record kinds.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .usernames
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;
        if state.usernames.contains_key(&data.username) {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        let now = Utc::now();
        let user = User {
            id: state.next_id(),
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        state.usernames.insert(user.username.clone(), user.id);
        state.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn create(&self, data: &CreateMovie) -> AppResult<Movie> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let id = state.next_id();
        let media_files = state.build_media(id, &data.media_files);
        let metadata = data
            .metadata
            .as_ref()
            .map(|input| state.build_metadata(id, None, input));

        let movie = Movie {
            id,
            title: data.title.clone(),
            director: data.director.clone(),
            year: data.year,
            plot: data.plot.clone(),
            genre: data.genre.clone(),
            rating: data.rating,
            duration_minutes: data.duration_minutes,
            media_files,
            metadata,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.movies.insert(id, movie.clone());
        Ok(movie)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let state = self.state.lock().await;
        Ok(state.movies.get(&id).filter(|m| !m.is_deleted()).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Movie>> {
        let state = self.state.lock().await;
        Ok(state
            .movies
            .values()
            .filter(|m| !m.is_deleted())
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, data: &UpdateMovie) -> AppResult<Option<Movie>> {
        let mut state = self.state.lock().await;
        if state.live_movie_mut(id).is_none() {
            return Ok(None);
        }

        let media_files = data
            .media_files
            .as_ref()
            .map(|input| state.build_media(id, input));
        let existing_metadata = state.movies.get(&id).and_then(|m| m.metadata.clone());
        let metadata = data
            .metadata
            .as_ref()
            .map(|input| state.build_metadata(id, existing_metadata.as_ref(), input));

        let Some(movie) = state.live_movie_mut(id) else {
            return Ok(None);
        };
        if let Some(title) = &data.title {
            movie.title = title.clone();
        }
        if let Some(director) = &data.director {
            movie.director = director.clone();
        }
        if let Some(year) = data.year {
            movie.year = year;
        }
        if let Some(plot) = &data.plot {
            movie.plot = plot.clone();
        }
        if let Some(genre) = &data.genre {
            movie.genre = genre.clone();
        }
        if let Some(rating) = data.rating {
            movie.rating = rating;
        }
        if let Some(duration) = data.duration_minutes {
            movie.duration_minutes = duration;
        }
        if let Some(media_files) = media_files {
            movie.media_files = media_files;
        }
        if metadata.is_some() {
            movie.metadata = metadata;
        }
        movie.updated_at = Utc::now();
        Ok(Some(movie.clone()))
    }

    async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state.live_movie_mut(id) {
            Some(movie) => {
                movie.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_media(
        &self,
        movie_id: i64,
        media_type: Option<MediaType>,
    ) -> AppResult<Vec<MovieMedia>> {
        let state = self.state.lock().await;
        let Some(movie) = state.movies.get(&movie_id).filter(|m| !m.is_deleted()) else {
            return Ok(Vec::new());
        };
        Ok(movie
            .media_files
            .iter()
            .filter(|m| media_type.is_none_or(|t| m.media_type == t))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MovieFileStore for MemoryStore {
    async fn create(&self, data: &CreateMovieFile) -> AppResult<MovieFile> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let file = MovieFile {
            id: state.next_id(),
            movie_id: data.movie_id,
            file_name: data.file_name.clone(),
            file_size: data.file_size,
            content_type: data.content_type.clone(),
            storage_path: data.storage_path.clone(),
            content_hash: data.content_hash.clone(),
            uploaded_by: data.uploaded_by,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn find_by_id(&self, movie_id: i64, file_id: i64) -> AppResult<Option<MovieFile>> {
        let state = self.state.lock().await;
        Ok(state
            .files
            .get(&file_id)
            .filter(|f| f.movie_id == movie_id && f.deleted_at.is_none())
            .cloned())
    }

    async fn soft_delete(&self, movie_id: i64, file_id: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state
            .files
            .get_mut(&file_id)
            .filter(|f| f.movie_id == movie_id && f.deleted_at.is_none())
        {
            Some(file) => {
                let now = Utc::now();
                file.deleted_at = Some(now);
                file.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_by_storage_path(&self, storage_path: &str) -> AppResult<i64> {
        let state = self.state.lock().await;
        Ok(state
            .files
            .values()
            .filter(|f| f.storage_path == storage_path && f.deleted_at.is_none())
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviehub_core::error::ErrorKind;

    fn new_movie(title: &str) -> CreateMovie {
        CreateMovie {
            title: title.to_string(),
            director: "Denis Villeneuve".to_string(),
            year: 2021,
            plot: String::new(),
            genre: "Sci-Fi".to_string(),
            rating: 8.0,
            duration_minutes: 155,
            media_files: vec![
                MovieMediaInput {
                    media_type: MediaType::Poster,
                    url: "https://img.example.com/dune.jpg".to_string(),
                    is_main: true,
                },
                MovieMediaInput {
                    media_type: MediaType::Trailer,
                    url: "https://video.example.com/dune.mp4".to_string(),
                    is_main: false,
                },
            ],
            metadata: None,
        }
    }

    fn new_file(movie_id: i64, path: &str) -> CreateMovieFile {
        CreateMovieFile {
            movie_id,
            file_name: "poster.png".to_string(),
            file_size: 4,
            content_type: "image/png".to_string(),
            storage_path: path.to_string(),
            content_hash: "ab".repeat(32),
            uploaded_by: 1,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        let users: &dyn UserStore = &store;
        let data = CreateUser {
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
        };

        let user = users.create(&data).await.unwrap();
        assert_eq!(
            users.find_by_username("alice").await.unwrap().unwrap().id,
            user.id
        );

        let err = users.create(&data).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_soft_deleted_movie_is_invisible() {
        let store = MemoryStore::new();
        let movies: &dyn MovieStore = &store;
        let movie = movies.create(&new_movie("Dune")).await.unwrap();

        assert!(movies.soft_delete(movie.id).await.unwrap());
        assert!(movies.find_by_id(movie.id).await.unwrap().is_none());
        assert!(movies.find_all().await.unwrap().is_empty());
        assert!(movies.find_media(movie.id, None).await.unwrap().is_empty());
        assert!(!movies.soft_delete(movie.id).await.unwrap());
        assert!(
            movies
                .update(movie.id, &UpdateMovie::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_is_partial_and_replaces_media() {
        let store = MemoryStore::new();
        let movies: &dyn MovieStore = &store;
        let movie = movies.create(&new_movie("Dune")).await.unwrap();

        let updated = movies
            .update(
                movie.id,
                &UpdateMovie {
                    rating: Some(9.1),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Dune");
        assert_eq!(updated.rating, 9.1);
        assert_eq!(updated.media_files.len(), 2);

        let updated = movies
            .update(
                movie.id,
                &UpdateMovie {
                    media_files: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.media_files.is_empty());
    }

    #[tokio::test]
    async fn test_find_media_filters_by_type() {
        let store = MemoryStore::new();
        let movies: &dyn MovieStore = &store;
        let movie = movies.create(&new_movie("Dune")).await.unwrap();

        let trailers = movies
            .find_media(movie.id, Some(MediaType::Trailer))
            .await
            .unwrap();
        assert_eq!(trailers.len(), 1);
        assert_eq!(trailers[0].media_type, MediaType::Trailer);
        assert!(
            movies
                .find_media(movie.id, Some(MediaType::Backdrop))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_file_reference_counting() {
        let store = MemoryStore::new();
        let files: &dyn MovieFileStore = &store;
        let path = "movie_7/abcdef012345.png";

        let first = files.create(&new_file(7, path)).await.unwrap();
        let second = files.create(&new_file(7, path)).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(files.count_by_storage_path(path).await.unwrap(), 2);

        assert!(files.soft_delete(7, first.id).await.unwrap());
        assert_eq!(files.count_by_storage_path(path).await.unwrap(), 1);
        assert!(files.find_by_id(7, first.id).await.unwrap().is_none());

        // wrong movie
        assert!(!files.soft_delete(8, second.id).await.unwrap());
        assert!(files.find_by_id(7, second.id).await.unwrap().is_some());
    }
}
