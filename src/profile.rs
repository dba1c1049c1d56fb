//! Saving edits to the signed-in user's profile

use log::info;

use crate::context::SessionContext;
use crate::error::{Error, Result};
use crate::models::User;
use crate::pipeline::CandidatePipeline;

/// Persists profile edits and refreshes the deck with the new preferences
pub struct ProfileEditor;

impl ProfileEditor {
    /// Check an edited profile before it is written
    pub fn validate(user: &User) -> Result<()> {
        if let (Some(min), Some(max)) = (user.min_seeking_age, user.max_seeking_age) {
            if min > max {
                return Err(Error::InvalidProfile(format!(
                    "minimum seeking age {} is above maximum {}",
                    min, max
                )));
            }
        }
        Ok(())
    }

    /// Write `user` and re-run the pipeline from `Idle`.
    ///
    /// Only the session's own profile may be saved. An error from the
    /// refresh means the write went through but the deck did not reload.
    pub async fn save(
        ctx: &SessionContext,
        user: &User,
        pipeline: &mut CandidatePipeline,
    ) -> Result<()> {
        let uid = ctx.current_user_id().ok_or(Error::NotAuthenticated)?;
        if uid != user.uid {
            return Err(Error::NotAuthenticated);
        }
        Self::validate(user)?;

        let record = user.to_record()?;
        ctx.store
            .set_document(&ctx.options.users_collection, &user.uid, &record)
            .await?;
        info!("Saved profile {}", user.uid);

        pipeline.run(ctx).await?;
        Ok(())
    }
}
