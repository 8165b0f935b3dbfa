//! Channel moderation rules.
//!
//! A channel is identified by its owner's user id. The owner and the
//! channel's moderators may ban and unban; only the owner edits the roster,
//! which is enforced by scoping every roster operation to the actor's own
//! channel. Platform staff may force any stream offline.

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use tracing::{info, warn};

use voxo_db::{Database, MAX_TIMESTAMP_YEAR};
use voxo_db::models::UserRow;
use voxo_types::api::{BanStatus, SanctionResponse, SelfStats};
use voxo_types::models::{Ban, Moderator};

use crate::convert;
use crate::error::{ApiError, InvalidOperation};
use crate::revalidate::Invalidations;

pub struct Authority<'a> {
    db: &'a Database,
    invalidations: &'a Invalidations,
}

impl<'a> Authority<'a> {
    pub fn new(db: &'a Database, invalidations: &'a Invalidations) -> Self {
        Self { db, invalidations }
    }

    /// True if the actor owns the channel or moderates it.
    pub fn is_mod_or_owner(&self, actor_id: &str, channel_id: &str) -> Result<bool, ApiError> {
        if actor_id == channel_id {
            return Ok(true);
        }
        Ok(self.db.is_moderator(actor_id, channel_id)?)
    }

    // -- Roster --

    /// Grant `target_user_id` moderation rights on the actor's channel.
    pub fn add_moderator(&self, actor: &UserRow, target_user_id: &str) -> Result<Moderator, ApiError> {
        if actor.id == target_user_id {
            return Err(InvalidOperation::AddSelfAsModerator.into());
        }
        self.require_user(target_user_id)?;

        let row = self
            .db
            .insert_moderator(target_user_id, &actor.id)?
            .ok_or(InvalidOperation::AlreadyModerator)?;

        info!(streamer_id = %actor.id, user_id = %target_user_id, "Moderator added");
        self.invalidations.revalidate_channel(&actor.username);
        Ok(convert::moderator(row))
    }

    /// Revoke `target_user_id`'s moderation rights on the actor's channel.
    pub fn remove_moderator(&self, actor: &UserRow, target_user_id: &str) -> Result<Moderator, ApiError> {
        if actor.id == target_user_id {
            return Err(InvalidOperation::RemoveSelfAsModerator.into());
        }

        let row = self
            .db
            .delete_moderator(target_user_id, &actor.id)?
            .ok_or(InvalidOperation::NotModerator)?;

        info!(streamer_id = %actor.id, user_id = %target_user_id, "Moderator removed");
        self.invalidations.revalidate_channel(&actor.username);
        Ok(convert::moderator(row))
    }

    pub fn list_moderators(&self, actor: &UserRow) -> Result<Vec<Moderator>, ApiError> {
        let rows = self.db.list_moderators(&actor.id)?;
        Ok(rows.into_iter().map(convert::moderator).collect())
    }

    // -- Bans --

    /// Ban `target_user_id` from `channel_id`, which defaults to the actor's
    /// own channel. A positive duration makes a timeout; anything else is
    /// permanent. An existing ban on the pair has its expiry replaced.
    pub fn ban_user(
        &self,
        actor: &UserRow,
        target_user_id: &str,
        duration_minutes: Option<f64>,
        channel_id: Option<&str>,
    ) -> Result<Ban, ApiError> {
        let channel_id = channel_id.filter(|id| !id.is_empty()).unwrap_or(&actor.id);

        if !self.is_mod_or_owner(&actor.id, channel_id)? {
            return Err(ApiError::Unauthorized("Unauthorized"));
        }
        if target_user_id == channel_id {
            return Err(InvalidOperation::BanStreamer.into());
        }
        if target_user_id == actor.id {
            return Err(InvalidOperation::BanSelf.into());
        }
        self.require_user(target_user_id)?;

        let now = Utc::now();
        let expires_at = ban_expiry(now, duration_minutes)?;
        let row = self.db.upsert_ban(target_user_id, channel_id, expires_at)?;

        info!(
            streamer_id = %channel_id,
            user_id = %target_user_id,
            banned_by = %actor.id,
            expires_at = ?expires_at,
            "User banned"
        );
        self.revalidate_channel_of(actor, channel_id);
        Ok(convert::ban(row, now))
    }

    /// Lift the ban on `target_user_id` in `channel_id` (default: the actor's
    /// own channel). Expired bans can be lifted too.
    pub fn unban_user(
        &self,
        actor: &UserRow,
        target_user_id: &str,
        channel_id: Option<&str>,
    ) -> Result<Ban, ApiError> {
        let channel_id = channel_id.filter(|id| !id.is_empty()).unwrap_or(&actor.id);

        if !self.is_mod_or_owner(&actor.id, channel_id)? {
            return Err(ApiError::Unauthorized("Unauthorized"));
        }
        if target_user_id == actor.id {
            return Err(InvalidOperation::UnbanSelf.into());
        }

        let row = self
            .db
            .delete_ban(target_user_id, channel_id)?
            .ok_or(InvalidOperation::NotBanned)?;

        info!(streamer_id = %channel_id, user_id = %target_user_id, unbanned_by = %actor.id, "User unbanned");
        self.revalidate_channel_of(actor, channel_id);
        Ok(convert::ban(row, Utc::now()))
    }

    pub fn list_banned_users(&self, actor: &UserRow) -> Result<Vec<Ban>, ApiError> {
        let now = Utc::now();
        let rows = self.db.list_bans(&actor.id)?;
        Ok(rows.into_iter().map(|row| convert::ban(row, now)).collect())
    }

    /// Whether `user_id` is currently banned from `channel_id`. Visible to the
    /// user in question and to the channel's owner and moderators.
    pub fn ban_status(&self, actor: &UserRow, user_id: &str, channel_id: &str) -> Result<BanStatus, ApiError> {
        if actor.id != user_id && !self.is_mod_or_owner(&actor.id, channel_id)? {
            return Err(ApiError::Unauthorized("Unauthorized"));
        }

        let ban = self
            .db
            .get_ban(user_id, channel_id)?
            .map(|row| convert::ban(row, Utc::now()))
            .filter(|ban| ban.active);

        Ok(BanStatus {
            user_id: user_id.to_string(),
            streamer_id: channel_id.to_string(),
            banned: ban.is_some(),
            expires_at: ban.and_then(|ban| ban.expires_at),
        })
    }

    // -- Staff --

    /// Force the target's stream offline. Staff and admins only.
    pub fn sanction_streamer(&self, actor: &UserRow, target_user_id: &str) -> Result<SanctionResponse, ApiError> {
        if !actor.role.is_staff() {
            return Err(ApiError::Unauthorized("Unauthorized: Staff Only"));
        }

        if !self.db.set_stream_live(target_user_id, false)? {
            return Err(InvalidOperation::StreamNotFound.into());
        }

        warn!(user_id = %target_user_id, staff_id = %actor.id, role = %actor.role, "Streamer sanctioned");
        if let Some(target) = self.db.get_user_by_id(target_user_id)? {
            self.invalidations.revalidate_channel(&target.username);
        }
        Ok(SanctionResponse { success: true })
    }

    pub fn self_stats(&self, actor: &UserRow) -> Result<SelfStats, ApiError> {
        Ok(SelfStats {
            diamonds: actor.diamonds,
            moderator_count: self.db.count_moderators(&actor.id)?,
            banned_count: self.db.count_active_bans(&actor.id, Utc::now())?,
        })
    }

    fn require_user(&self, user_id: &str) -> Result<UserRow, ApiError> {
        self.db
            .get_user_by_id(user_id)?
            .ok_or(ApiError::InvalidOperation(InvalidOperation::UserNotFound))
    }

    fn revalidate_channel_of(&self, actor: &UserRow, channel_id: &str) {
        if channel_id == actor.id {
            self.invalidations.revalidate_channel(&actor.username);
            return;
        }
        match self.db.get_user_by_id(channel_id) {
            Ok(Some(owner)) => self.invalidations.revalidate_channel(&owner.username),
            Ok(None) => {}
            Err(e) => warn!("Skipping revalidation of channel {}: {:#}", channel_id, e),
        }
    }
}

/// Expiry for a ban issued at `now`. Zero, negative and absent durations
/// mean permanent. Expiries past the end of year 9999 are out of range.
pub fn ban_expiry(
    now: DateTime<Utc>,
    duration_minutes: Option<f64>,
) -> Result<Option<DateTime<Utc>>, InvalidOperation> {
    let Some(minutes) = duration_minutes.filter(|m| *m > 0.0) else {
        return Ok(None);
    };

    let millis = minutes * 60_000.0;
    if !millis.is_finite() || millis >= i64::MAX as f64 {
        return Err(InvalidOperation::DurationOutOfRange);
    }

    TimeDelta::try_milliseconds(millis as i64)
        .and_then(|delta| now.checked_add_signed(delta))
        .filter(|at| at.year() <= MAX_TIMESTAMP_YEAR)
        .map(Some)
        .ok_or(InvalidOperation::DurationOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use chrono::{Duration, TimeZone};
    use voxo_types::models::Role;

    fn invalid(err: ApiError) -> InvalidOperation {
        match err {
            ApiError::InvalidOperation(reason) => reason,
            other => panic!("expected invalid operation, got {:?}", other),
        }
    }

    #[test]
    fn owner_and_moderators_pass_the_predicate() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let bob = testing::user(&state, "bob", Role::User);
        let auth = state.authority();

        assert!(auth.is_mod_or_owner(&owner.id, &owner.id).unwrap());
        assert!(!auth.is_mod_or_owner(&bob.id, &owner.id).unwrap());

        auth.add_moderator(&owner, &bob.id).unwrap();
        assert!(auth.is_mod_or_owner(&bob.id, &owner.id).unwrap());
        // Moderation does not flow the other way.
        assert!(!auth.is_mod_or_owner(&owner.id, &bob.id).unwrap());
    }

    #[test]
    fn moderator_grants_are_unique() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let bob = testing::user(&state, "bob", Role::User);
        let auth = state.authority();

        let grant = auth.add_moderator(&owner, &bob.id).unwrap();
        assert_eq!(grant.streamer_id, owner.id);
        assert_eq!(grant.user.username, "bob");

        let err = auth.add_moderator(&owner, &bob.id).unwrap_err();
        assert_eq!(invalid(err), InvalidOperation::AlreadyModerator);
    }

    #[test]
    fn roster_rejects_self_targeting() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let auth = state.authority();

        assert_eq!(
            invalid(auth.add_moderator(&owner, &owner.id).unwrap_err()),
            InvalidOperation::AddSelfAsModerator
        );
        assert_eq!(
            invalid(auth.remove_moderator(&owner, &owner.id).unwrap_err()),
            InvalidOperation::RemoveSelfAsModerator
        );
    }

    #[test]
    fn removing_a_grant_revokes_rights() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let bob = testing::user(&state, "bob", Role::User);
        let auth = state.authority();

        assert_eq!(
            invalid(auth.remove_moderator(&owner, &bob.id).unwrap_err()),
            InvalidOperation::NotModerator
        );

        let grant = auth.add_moderator(&owner, &bob.id).unwrap();
        let removed = auth.remove_moderator(&owner, &bob.id).unwrap();
        assert_eq!(removed.id, grant.id);
        assert!(!auth.is_mod_or_owner(&bob.id, &owner.id).unwrap());
    }

    #[test]
    fn unknown_targets_are_rejected() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let auth = state.authority();

        assert_eq!(
            invalid(auth.add_moderator(&owner, "no-such-user").unwrap_err()),
            InvalidOperation::UserNotFound
        );
        assert_eq!(
            invalid(auth.ban_user(&owner, "no-such-user", None, None).unwrap_err()),
            InvalidOperation::UserNotFound
        );
    }

    #[test]
    fn timeout_then_permanent_reuses_the_record() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let troll = testing::user(&state, "troll", Role::User);
        let auth = state.authority();

        let before = Utc::now();
        let timeout = auth.ban_user(&owner, &troll.id, Some(10.0), None).unwrap();
        let expires_at = timeout.expires_at.unwrap();
        let drift = expires_at - (before + Duration::minutes(10));
        assert!(drift.num_seconds().abs() <= 1, "drift {:?}", drift);
        assert!(timeout.active);
        assert_eq!(timeout.streamer_id, owner.id);
        assert_eq!(timeout.user.username, "troll");

        let permanent = auth.ban_user(&owner, &troll.id, None, None).unwrap();
        assert_eq!(permanent.id, timeout.id);
        assert!(permanent.is_permanent());
        assert_eq!(auth.list_banned_users(&owner).unwrap().len(), 1);
    }

    #[test]
    fn non_positive_durations_are_permanent() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let troll = testing::user(&state, "troll", Role::User);
        let auth = state.authority();

        assert!(auth.ban_user(&owner, &troll.id, Some(0.0), None).unwrap().is_permanent());
        assert!(auth.ban_user(&owner, &troll.id, Some(-5.0), None).unwrap().is_permanent());
    }

    #[test]
    fn later_ban_replaces_rather_than_extends() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let troll = testing::user(&state, "troll", Role::User);
        let auth = state.authority();

        auth.ban_user(&owner, &troll.id, Some(600.0), None).unwrap();
        let shortened = auth.ban_user(&owner, &troll.id, Some(1.0), None).unwrap();
        assert!(shortened.expires_at.unwrap() < Utc::now() + Duration::minutes(2));
    }

    #[test]
    fn cannot_ban_the_streamer_or_self() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let bob = testing::user(&state, "bob", Role::User);
        let auth = state.authority();

        assert_eq!(
            invalid(auth.ban_user(&owner, &owner.id, Some(5.0), None).unwrap_err()),
            InvalidOperation::BanStreamer
        );

        auth.add_moderator(&owner, &bob.id).unwrap();
        assert_eq!(
            invalid(auth.ban_user(&bob, &owner.id, None, Some(&owner.id)).unwrap_err()),
            InvalidOperation::BanStreamer
        );
        assert_eq!(
            invalid(auth.ban_user(&bob, &bob.id, None, Some(&owner.id)).unwrap_err()),
            InvalidOperation::BanSelf
        );
    }

    #[test]
    fn unban_requires_an_existing_ban() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let troll = testing::user(&state, "troll", Role::User);
        let auth = state.authority();

        assert_eq!(
            invalid(auth.unban_user(&owner, &troll.id, None).unwrap_err()),
            InvalidOperation::NotBanned
        );

        let ban = auth.ban_user(&owner, &troll.id, Some(10.0), None).unwrap();
        let lifted = auth.unban_user(&owner, &troll.id, None).unwrap();
        assert_eq!(lifted.id, ban.id);

        assert_eq!(
            invalid(auth.unban_user(&owner, &troll.id, None).unwrap_err()),
            InvalidOperation::NotBanned
        );
        assert_eq!(
            invalid(auth.unban_user(&owner, &owner.id, None).unwrap_err()),
            InvalidOperation::UnbanSelf
        );
    }

    #[test]
    fn moderators_ban_on_behalf_of_the_owner() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let bob = testing::user(&state, "bob", Role::User);
        let troll = testing::user(&state, "troll", Role::User);
        let carol = testing::user(&state, "carol", Role::User);
        let auth = state.authority();

        auth.add_moderator(&owner, &bob.id).unwrap();

        let ban = auth.ban_user(&bob, &troll.id, Some(5.0), Some(&owner.id)).unwrap();
        assert_eq!(ban.streamer_id, owner.id);
        assert_eq!(auth.list_banned_users(&owner).unwrap().len(), 1);
        auth.unban_user(&bob, &troll.id, Some(&owner.id)).unwrap();

        // Roster changes by the moderator only ever touch the moderator's own
        // channel, never the owner's.
        auth.add_moderator(&bob, &carol.id).unwrap();
        assert!(!auth.is_mod_or_owner(&carol.id, &owner.id).unwrap());
        assert_eq!(
            invalid(auth.remove_moderator(&bob, &owner.id).unwrap_err()),
            InvalidOperation::NotModerator
        );
        assert_eq!(auth.list_moderators(&owner).unwrap().len(), 1);
    }

    #[test]
    fn outsiders_cannot_ban_or_unban() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let outsider = testing::user(&state, "outsider", Role::User);
        let troll = testing::user(&state, "troll", Role::User);
        let auth = state.authority();

        let err = auth.ban_user(&outsider, &troll.id, None, Some(&owner.id)).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        auth.ban_user(&owner, &troll.id, None, None).unwrap();
        let err = auth.unban_user(&outsider, &troll.id, Some(&owner.id)).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn sanction_is_staff_only() {
        let state = testing::state();
        let streamer = testing::user(&state, "streamer", Role::User);
        let viewer = testing::user(&state, "viewer", Role::User);
        let staff = testing::user(&state, "staff", Role::Staff);
        let admin = testing::user(&state, "admin", Role::Admin);
        let auth = state.authority();

        state.db.set_stream_live(&streamer.id, true).unwrap();

        let err = auth.sanction_streamer(&viewer, &streamer.id).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized("Unauthorized: Staff Only")));
        assert!(state.db.get_stream(&streamer.id).unwrap().unwrap().is_live);

        assert!(auth.sanction_streamer(&staff, &streamer.id).unwrap().success);
        assert!(!state.db.get_stream(&streamer.id).unwrap().unwrap().is_live);

        state.db.set_stream_live(&streamer.id, true).unwrap();
        auth.add_moderator(&streamer, &viewer.id).unwrap();
        assert!(auth.sanction_streamer(&admin, &streamer.id).unwrap().success);
        assert!(!state.db.get_stream(&streamer.id).unwrap().unwrap().is_live);
        // Channel moderation state is untouched.
        assert_eq!(auth.list_moderators(&streamer).unwrap().len(), 1);

        assert_eq!(
            invalid(auth.sanction_streamer(&admin, "no-such-user").unwrap_err()),
            InvalidOperation::StreamNotFound
        );
    }

    #[test]
    fn concurrent_bans_leave_one_record() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let troll = testing::user(&state, "troll", Role::User);

        let ids: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| state.authority().ban_user(&owner, &troll.id, Some(10.0), None)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap().unwrap().id).collect()
        });

        assert!(ids.iter().all(|id| *id == ids[0]));
        assert_eq!(state.authority().list_banned_users(&owner).unwrap().len(), 1);
    }

    #[test]
    fn expired_bans_are_inactive_until_removed() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let troll = testing::user(&state, "troll", Role::User);
        let auth = state.authority();

        state
            .db
            .upsert_ban(&troll.id, &owner.id, Some(Utc::now() - Duration::minutes(1)))
            .unwrap();

        let status = auth.ban_status(&troll, &troll.id, &owner.id).unwrap();
        assert!(!status.banned);
        assert!(status.expires_at.is_none());

        let listed = auth.list_banned_users(&owner).unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].active);
        assert_eq!(auth.self_stats(&owner).unwrap().banned_count, 0);

        // Lifting an expired ban still works.
        auth.unban_user(&owner, &troll.id, None).unwrap();
    }

    #[test]
    fn ban_status_is_private_to_channel_staff_and_the_user() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let troll = testing::user(&state, "troll", Role::User);
        let outsider = testing::user(&state, "outsider", Role::User);
        let auth = state.authority();

        auth.ban_user(&owner, &troll.id, None, None).unwrap();

        assert!(auth.ban_status(&owner, &troll.id, &owner.id).unwrap().banned);
        assert!(auth.ban_status(&troll, &troll.id, &owner.id).unwrap().banned);
        assert!(matches!(
            auth.ban_status(&outsider, &troll.id, &owner.id).unwrap_err(),
            ApiError::Unauthorized(_)
        ));
    }

    #[test]
    fn mutations_invalidate_the_channel_page() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let bob = testing::user(&state, "bob", Role::User);
        let troll = testing::user(&state, "troll", Role::User);
        let mut rx = state.invalidations.subscribe();
        let auth = state.authority();

        auth.add_moderator(&owner, &bob.id).unwrap();
        auth.ban_user(&bob, &troll.id, None, Some(&owner.id)).unwrap();
        auth.add_moderator(&owner, &bob.id).unwrap_err();

        assert_eq!(rx.try_recv().unwrap().path, "/u/owner");
        assert_eq!(rx.try_recv().unwrap().path, "/u/owner");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn expiry_arithmetic() {
        let now = Utc::now();
        assert_eq!(ban_expiry(now, None).unwrap(), None);
        assert_eq!(ban_expiry(now, Some(0.0)).unwrap(), None);
        assert_eq!(ban_expiry(now, Some(1.5)).unwrap(), Some(now + Duration::seconds(90)));
        assert_eq!(ban_expiry(now, Some(1e300)).unwrap_err(), InvalidOperation::DurationOutOfRange);
        assert_eq!(ban_expiry(now, Some(1e15)).unwrap_err(), InvalidOperation::DurationOutOfRange);
        assert_eq!(ban_expiry(now, Some(5e9)).unwrap_err(), InvalidOperation::DurationOutOfRange);
    }

    #[test]
    fn expiry_stops_at_the_last_storable_year() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 0).unwrap();
        let minutes = (last - now).num_minutes() as f64;

        assert_eq!(ban_expiry(now, Some(minutes)).unwrap(), Some(last));
        assert_eq!(
            ban_expiry(now, Some(minutes + 1.0)).unwrap_err(),
            InvalidOperation::DurationOutOfRange
        );
    }

    #[test]
    fn far_future_timeouts_are_counted_consistently() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let troll = testing::user(&state, "troll", Role::User);
        let auth = state.authority();

        assert_eq!(
            invalid(auth.ban_user(&owner, &troll.id, Some(5e9), None).unwrap_err()),
            InvalidOperation::DurationOutOfRange
        );
        assert!(auth.list_banned_users(&owner).unwrap().is_empty());

        // About 7900 years: still inside the storable range.
        let ban = auth.ban_user(&owner, &troll.id, Some(4.15e9), None).unwrap();
        assert!(ban.active);
        assert!(ban.expires_at.unwrap().year() <= MAX_TIMESTAMP_YEAR);
        assert!(auth.ban_status(&owner, &troll.id, &owner.id).unwrap().banned);
        assert_eq!(auth.self_stats(&owner).unwrap().banned_count, 1);
    }

    #[test]
    fn empty_channel_falls_back_to_the_actors_own() {
        let state = testing::state();
        let owner = testing::user(&state, "owner", Role::User);
        let troll = testing::user(&state, "troll", Role::User);
        let auth = state.authority();

        let ban = auth.ban_user(&owner, &troll.id, Some(5.0), Some("")).unwrap();
        assert_eq!(ban.streamer_id, owner.id);
        assert_eq!(auth.list_banned_users(&owner).unwrap().len(), 1);

        let lifted = auth.unban_user(&owner, &troll.id, Some("")).unwrap();
        assert_eq!(lifted.id, ban.id);
        assert!(auth.list_banned_users(&owner).unwrap().is_empty());
    }
}
