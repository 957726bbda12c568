mod guild_setting;
