use super::Actions;
use mosaic_core::{
    GuildMemberRemovePayload, GuildRoleDeletePayload, GuildRolePayload, Member, MemberPayload,
    PartialKind, Role,
};
use mosaic_interface::Notification;
use tracing::{debug, instrument};

impl Actions {
    /// Cache a member who joined and bump the member count.
    #[instrument(skip(self, payload))]
    pub fn guild_member_add(&mut self, payload: &MemberPayload) -> Option<Member> {
        let guild_id = payload.guild_id?;
        let member = self.store.upsert_member(guild_id, payload)?.clone();
        if let Some(guild) = self.store.guild_mut(guild_id) {
            guild.adjust_member_count(1);
        }
        self.emit(Notification::GuildMemberAdd(member.clone()));
        Some(member)
    }

    /// Remove a member who left, with their voice state.
    ///
    /// The member count drops even when the member itself was not cached.
    #[instrument(skip(self, payload), fields(guild_id = %payload.guild_id, user_id = %payload.user.id))]
    pub fn guild_member_remove(&mut self, payload: &GuildMemberRemovePayload) -> Option<Member> {
        let user_id = payload.user.id;
        let allow_partial = self.partials.allows(PartialKind::GuildMember);
        if self.store.guild(payload.guild_id).is_none() {
            return None;
        }
        if self.store.user(user_id).is_some() || allow_partial {
            self.store.upsert_user(&payload.user);
        }

        let guild = self.store.guild_mut(payload.guild_id)?;
        guild.adjust_member_count(-1);
        let mut member = match guild.members_mut().remove(&user_id) {
            Some(member) => member,
            None if allow_partial => Member::new(payload.guild_id, user_id, Vec::new(), None),
            None => {
                debug!("Member not cached");
                return None;
            }
        };
        guild.voice_states_mut().remove(&user_id);

        member.mark_deleted();
        self.emit(Notification::GuildMemberRemove(member.clone()));
        Some(member)
    }

    /// Cache a role; announce it only if it is new.
    #[instrument(skip(self, payload), fields(guild_id = %payload.guild_id, role_id = %payload.role.id))]
    pub fn guild_role_create(&mut self, payload: &GuildRolePayload) -> Option<Role> {
        let existed = self
            .store
            .guild(payload.guild_id)?
            .roles()
            .contains_key(&payload.role.id);
        let role = self
            .store
            .upsert_role(payload.guild_id, &payload.role)?
            .clone();
        if !existed {
            self.emit(Notification::RoleCreate(role.clone()));
        }
        Some(role)
    }

    /// Remove a role and flag it deleted.
    #[instrument(skip(self, payload), fields(guild_id = %payload.guild_id, role_id = %payload.role_id))]
    pub fn guild_role_delete(&mut self, payload: &GuildRoleDeletePayload) -> Option<Role> {
        let mut role = self
            .store
            .guild_mut(payload.guild_id)?
            .roles_mut()
            .remove(&payload.role_id)?;
        role.mark_deleted();
        self.emit(Notification::RoleDelete(role.clone()));
        Some(role)
    }
}
