pub mod activity;
pub mod performance;
pub mod profile;
pub mod session;

pub use activity::{Activity, ActivitySession};
pub use performance::{Performance, PerformanceData, PerformanceStat};
pub use profile::{KeyData, KeyDataTile, Profile, UserInfo};
pub use session::{LetteredSession, PaddedSession, Session, UserSession};
