use db::types::UserInfo;

use crate::console::Render;

pub struct UserView<'a> {
    user: &'a UserInfo,
}

impl<'a> UserView<'a> {
    pub fn new(user: &'a UserInfo) -> Self {
        Self { user }
    }

    pub fn render<R: Render + ?Sized>(&self, out: &mut R) {
        out.print_line(&format!(
            "User: {} (ID={}) Created: {}",
            self.user.username,
            self.user.user_id,
            self.user.created.format("%Y-%m-%d %H:%M:%S")
        ));
    }
}
