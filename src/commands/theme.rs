use eyre::Result;

use crate::settings::SettingsStore;
use crate::ui::{self, Palette};

pub fn run(store: &mut SettingsStore) -> Result<()> {
    let theme = store.update(|doc| {
        doc.theme = doc.theme.toggled();
        doc.theme
    })?;

    log::info!("Theme switched to {}", theme);
    ui::popup(&Palette::new(theme), "Тема", &format!("Тема изменена! ({})", theme));
    Ok(())
}
