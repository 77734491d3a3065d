//! Read-only client for the Al Quran Cloud content API.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::AppLanguage;

const QURAN_API_BASE: &str = "https://api.alquran.cloud/v1";

/// Edition holding the original Arabic text.
const ORIGINAL_EDITION: &str = "quran-uthmani";
/// Fallback translation when a language has no mapped edition.
const FALLBACK_EDITION: &str = "en.sahih";

/// Translation edition for an interface language.
pub fn edition_for(language: AppLanguage) -> &'static str {
    match language {
        AppLanguage::English => FALLBACK_EDITION,
        AppLanguage::Urdu => "ur.jalandhry",
        AppLanguage::Pashto => "ps.abdulwali",
        // Arabic readers get a tafsir rather than a translation.
        AppLanguage::Arabic => "ar.jalalayn",
        AppLanguage::Spanish => "es.asad",
        AppLanguage::French => "fr.hamidullah",
        AppLanguage::German => "de.aburida",
        AppLanguage::Hindi => "hi.hindi",
        AppLanguage::Bengali => "bn.bengali",
        AppLanguage::Chinese => "zh.jian",
        AppLanguage::Russian => "ru.kuliev",
        AppLanguage::Portuguese => "pt.elhayek",
        AppLanguage::Turkish => "tr.ates",
    }
}

/// Chapter metadata from the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Surah {
    pub number: u32,
    /// Arabic name.
    pub name: String,
    #[serde(rename = "englishName")]
    pub english_name: String,
    #[serde(rename = "englishNameTranslation")]
    pub english_name_translation: String,
    #[serde(rename = "numberOfAyahs")]
    pub number_of_ayahs: u32,
    #[serde(rename = "revelationType")]
    pub revelation_type: String,
}

/// One verse with its selected translation.
#[derive(Debug, Clone)]
pub struct Ayah {
    pub number: u32,
    pub text: String,
    pub translation: String,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct SurahContent {
    ayahs: Vec<RawAyah>,
}

#[derive(Debug, Deserialize)]
struct RawAyah {
    #[serde(rename = "numberInSurah")]
    number_in_surah: u32,
    text: String,
}

pub struct QuranClient {
    client: reqwest::Client,
}

impl QuranClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the chapter listing.
    pub async fn list_surahs(&self) -> Result<Vec<Surah>> {
        let url = format!("{QURAN_API_BASE}/surah");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch surah listing")?;

        if !response.status().is_success() {
            anyhow::bail!("Quran API error ({})", response.status());
        }

        let envelope: ApiEnvelope<Vec<Surah>> = response
            .json()
            .await
            .context("Failed to parse surah listing")?;
        Ok(envelope.data)
    }

    /// Fetch one chapter: the Uthmani text plus the translation edition for
    /// the given language, zipped verse-by-verse.
    pub async fn fetch_surah(&self, number: u32, language: AppLanguage) -> Result<Vec<Ayah>> {
        let edition = edition_for(language);
        let (original, translation) = tokio::try_join!(
            self.fetch_edition(number, ORIGINAL_EDITION),
            self.fetch_edition(number, edition),
        )?;

        let ayahs = original
            .ayahs
            .into_iter()
            .zip(translation.ayahs)
            .map(|(ar, tr)| Ayah {
                number: ar.number_in_surah,
                text: ar.text,
                translation: tr.text,
            })
            .collect();
        Ok(ayahs)
    }

    async fn fetch_edition(&self, number: u32, edition: &str) -> Result<SurahContent> {
        let url = format!("{QURAN_API_BASE}/surah/{number}/{edition}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch surah {number} ({edition})"))?;

        if !response.status().is_success() {
            anyhow::bail!("Quran API error ({}) for edition {edition}", response.status());
        }

        let envelope: ApiEnvelope<SurahContent> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse surah {number} ({edition})"))?;
        Ok(envelope.data)
    }
}

impl Default for QuranClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Client-side listing filter: substring of the English name, or the chapter
/// number as typed.
pub fn filter_surahs<'a>(surahs: &'a [Surah], query: &str) -> Vec<&'a Surah> {
    let query = query.trim().to_lowercase();
    surahs
        .iter()
        .filter(|s| {
            query.is_empty()
                || s.english_name.to_lowercase().contains(&query)
                || s.number.to_string().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surah(number: u32, english_name: &str) -> Surah {
        Surah {
            number,
            name: "سورة".into(),
            english_name: english_name.into(),
            english_name_translation: "".into(),
            number_of_ayahs: 7,
            revelation_type: "Meccan".into(),
        }
    }

    #[test]
    fn every_language_has_an_edition() {
        for lang in AppLanguage::ALL {
            assert!(!edition_for(lang).is_empty());
        }
        assert_eq!(edition_for(AppLanguage::English), FALLBACK_EDITION);
    }

    #[test]
    fn filter_matches_name_substring_case_insensitively() {
        let list = vec![surah(1, "Al-Faatiha"), surah(2, "Al-Baqara"), surah(36, "Yaseen")];
        let hits = filter_surahs(&list, "baq");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].number, 2);
    }

    #[test]
    fn filter_matches_chapter_number() {
        let list = vec![surah(1, "Al-Faatiha"), surah(36, "Yaseen"), surah(3, "Aal-i-Imraan")];
        let hits = filter_surahs(&list, "36");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].english_name, "Yaseen");
    }

    #[test]
    fn empty_query_returns_everything() {
        let list = vec![surah(1, "Al-Faatiha"), surah(2, "Al-Baqara")];
        assert_eq!(filter_surahs(&list, "  ").len(), 2);
    }

    #[tokio::test]
    #[ignore] // Hits the public content API
    async fn live_surah_listing() {
        let client = QuranClient::new();
        let surahs = client.list_surahs().await.unwrap();
        assert_eq!(surahs.len(), 114);
    }
}
