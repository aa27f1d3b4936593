//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod mood_entry_repo;
pub mod password_reset_repo;
pub mod playlist_repo;
pub mod session_repo;
pub mod specialized_playlist_repo;
pub mod track_repo;
pub mod user_preference_repo;
pub mod user_repo;

pub use mood_entry_repo::MoodEntryRepo;
pub use password_reset_repo::PasswordResetRepo;
pub use playlist_repo::PlaylistRepo;
pub use session_repo::SessionRepo;
pub use specialized_playlist_repo::SpecializedPlaylistRepo;
pub use track_repo::TrackRepo;
pub use user_preference_repo::UserPreferenceRepo;
pub use user_repo::UserRepo;
