//! # Module Catalog
//!
//! The static table of hardware modules the bot can describe. Entries are
//! kept in authoring order, which is also the order of the main menu.

use indexmap::IndexMap;

use crate::errors::CatalogError;

/// Label and callback data of the back control
pub const BACK_BUTTON: &str = "⬅️ Orqaga";
/// Maximum size of Telegram callback data in bytes
pub const MAX_CALLBACK_DATA_BYTES: usize = 64;
/// Maximum length of a photo caption in characters
pub const MAX_CAPTION_CHARS: usize = 1024;

/// A single hardware module shown by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Button label and callback identifier
    pub name: String,
    /// Description sent when the module is selected
    pub text: String,
    /// Image filename, resolved against the image directory
    pub image: Option<String>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, text: impl Into<String>, image: Option<&str>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            image: image.map(str::to_string),
        }
    }
}

/// Ordered, read-only mapping from module name to entry
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    /// Build a catalog, validating that every name is usable as callback data
    pub fn from_entries<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut map = IndexMap::new();

        for entry in entries {
            if entry.name.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if entry.name == BACK_BUTTON {
                return Err(CatalogError::ReservedName(entry.name));
            }
            if entry.name.len() > MAX_CALLBACK_DATA_BYTES {
                return Err(CatalogError::CallbackTooLong {
                    len: entry.name.len(),
                    name: entry.name,
                });
            }
            if map.contains_key(&entry.name) {
                return Err(CatalogError::DuplicateName(entry.name));
            }
            map.insert(entry.name.clone(), entry);
        }

        Ok(Self { entries: map })
    }

    /// The catalog shipped with the bot
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_entries(
            BUILTIN_MODULES
                .iter()
                .map(|(name, text, image)| CatalogEntry::new(*name, *text, *image)),
        )
    }

    pub fn lookup(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Module names in authoring order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const BUILTIN_MODULES: &[(&str, &str, Option<&str>)] = &[
    (
        "Arduino",
        concat!(
            "🔵 Arduino haqida:\n",
            "\n",
            "Arduino — ochiq manbali mikrokontroller platformasi.\n",
            "\n",
            "📌 ATmega328P chip\n",
            "📌 14 digital pin\n",
            "📌 6 analog pin\n",
            "📌 5V ishlash kuchlanishi\n",
            "\n",
            "Robototexnika va IoT loyihalarda ishlatiladi."
        ),
        Some("arduino.png"),
    ),
    (
        "DHT11",
        "🟢 DHT11 harorat va namlik sensori.\nVCC→5V\nGND→GND\nDATA→D2",
        Some("dht11.jpg"),
    ),
    (
        "DHT22",
        "🟢 DHT22 aniqligi yuqori sensor.\nVCC→5V\nGND→GND\nDATA→D2",
        Some("dht22.jpg"),
    ),
    (
        "Servo",
        "🟢 Servo motor.\nQizil→5V\nJigarrang→GND\nSariq→D9",
        Some("servo.jpg"),
    ),
    (
        "Stepper",
        "🟢 Stepper (ULN2003).\nIN1→D8\nIN2→D9\nIN3→D10\nIN4→D11",
        Some("stepper.jpg"),
    ),
    (
        "Bluetooth",
        "🟢 HC-05 Bluetooth.\nVCC→5V\nGND→GND\nTX→RX\nRX→TX",
        Some("bluetooth.jpg"),
    ),
    (
        "ESP32",
        concat!(
            "🔵 ESP32 haqida:\n",
            "\n",
            "WiFi + Bluetooth chip\n",
            "240MHz dual-core\n",
            "3.3V logika\n",
            "Ko‘plab GPIO pinlar"
        ),
        Some("esp32.jpg"),
    ),
    (
        "RFID",
        "🟢 RFID RC522.\nSDA→D10\nSCK→D13\nMOSI→D11\nMISO→D12\nRST→D9",
        Some("rfid.png"),
    ),
    (
        "IR control",
        "🟢 IR Receiver.\nVCC→5V\nGND→GND\nOUT→D2",
        Some("ir_control.jpg"),
    ),
    (
        "LED",
        "🟢 LED ulanishi.\nAnod→220Ω→D13\nKatod→GND",
        Some("led.jpg"),
    ),
];
