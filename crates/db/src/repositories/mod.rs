//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Ordered collections (tracks,
//! sets, performances) run their mutations through [`crate::ordinal`]
//! inside a single transaction.

pub mod album_repo;
pub mod event_repo;
pub mod performance_repo;
pub mod set_repo;
pub mod song_repo;
pub mod track_repo;

pub use album_repo::AlbumRepo;
pub use event_repo::EventRepo;
pub use performance_repo::PerformanceRepo;
pub use set_repo::SetRepo;
pub use song_repo::SongRepo;
pub use track_repo::TrackRepo;
