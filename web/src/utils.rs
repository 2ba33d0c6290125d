use gloo::storage::{LocalStorage, Storage};
use grassweeper_core::BestTime;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Local storage slot for a persisted value.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
    fn local_save(&self);
}

impl<T> LocalOrDefault for T
where
    T: StorageKey + Default + Serialize + DeserializeOwned,
{
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_else(|err| {
            log::debug!("nothing usable stored under {}: {:?}", T::KEY, err);
            T::default()
        })
    }

    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("failed to save {}: {:?}", T::KEY, err);
        }
    }
}

impl StorageKey for BestTime {
    const KEY: &'static str = "grassweeper:best-time";
}

/// Reads the best time record, stored as plain text rather than JSON.
pub(crate) fn load_best_time() -> Option<BestTime> {
    match LocalStorage::raw().get_item(BestTime::KEY) {
        Ok(record) => record.as_deref().and_then(BestTime::parse_record),
        Err(err) => {
            log::error!("failed to read best time: {:?}", err);
            None
        }
    }
}

pub(crate) fn save_best_time(best: BestTime) {
    if let Err(err) = LocalStorage::raw().set_item(BestTime::KEY, &best.to_record()) {
        log::error!("failed to save best time: {:?}", err);
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::settings::Settings;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn best_time_is_stored_as_plain_text() {
        LocalStorage::delete(BestTime::KEY);
        assert_eq!(load_best_time(), None);

        let best = BestTime::new(42).unwrap();
        save_best_time(best);
        let raw = LocalStorage::raw().get_item(BestTime::KEY).unwrap();
        assert_eq!(raw.as_deref(), Some("42\n"));
        assert_eq!(load_best_time(), Some(best));

        LocalStorage::raw().set_item(BestTime::KEY, "soon").unwrap();
        assert_eq!(load_best_time(), None);
        LocalStorage::delete(BestTime::KEY);
    }

    #[wasm_bindgen_test]
    fn settings_survive_a_reload() {
        LocalStorage::delete(Settings::KEY);
        assert_eq!(Settings::local_or_default(), Settings::default());

        Settings { sound_enabled: false }.local_save();
        assert!(!Settings::local_or_default().sound_enabled);

        LocalStorage::raw().set_item(Settings::KEY, "not json").unwrap();
        assert_eq!(Settings::local_or_default(), Settings::default());
        LocalStorage::delete(Settings::KEY);
    }
}
