use serenity::all::Permissions;

/// A guild role as seen by the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: u64,
    pub name: String,
    /// RGB colour, `0` when the role has no colour.
    pub color: u32,
    pub position: u16,
    pub permissions: Permissions,
}

impl Role {
    /// Colour formatted as `#rrggbb`.
    pub fn hex_color(&self) -> String {
        format!("#{:06x}", self.color & 0x00ff_ffff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hex_colour_with_padding() {
        let role = Role {
            id: 1,
            name: "Mods".to_string(),
            color: 0x00abcd,
            position: 1,
            permissions: Permissions::empty(),
        };
        assert_eq!(role.hex_color(), "#00abcd");
    }
}
