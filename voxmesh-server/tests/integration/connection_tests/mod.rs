mod test_disconnect_triggers_member_left;
mod test_join_receives_current_members;
mod test_two_user_scenario;
