use crate::models::field::ListField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub name: &'static str,
    pub arabic: Option<&'static str>,
}

const fn item(id: &'static str, name: &'static str, arabic: Option<&'static str>) -> ChecklistItem {
    ChecklistItem { id, name, arabic }
}

pub const FARD: &[ChecklistItem] = &[
    item("fajr", "Fajr", Some("الفجر")),
    item("dhuhr", "Dhuhr", Some("الظهر")),
    item("asr", "Asr", Some("العصر")),
    item("maghrib", "Maghrib", Some("المغرب")),
    item("isha", "Isha", Some("العشاء")),
];

pub const SUNNAH: &[ChecklistItem] = &[
    item("s_fajr_b", "Sunnah of Fajr (before)", None),
    item("s_zuhr_b", "Sunnah of Dhuhr (before)", None),
    item("s_zuhr_a", "Sunnah of Dhuhr (after)", None),
    item("s_maghrib_a", "Sunnah of Maghrib (after)", None),
    item("s_isha_a", "Sunnah of Isha (after)", None),
];

pub const ADDITIONAL: &[ChecklistItem] = &[
    item("duha", "Duha", Some("صلاة الضحى")),
    item("tahajjud", "Tahajjud", Some("صلاة التهجد")),
    item("ishraq", "Ishraq", Some("صلاة الإشراق")),
    item("avvabin", "Awwabin", Some("صلاة الأوابين")),
    item("other", "Other", None),
];

pub const PRACTICES: &[ChecklistItem] = &[
    item("subhanallah", "SubhanAllah", Some("سبحان الله")),
    item("alhamdulillah", "Alhamdulillah", Some("الحمد لله")),
    item("allahuakbar", "Allahu Akbar", Some("الله أكبر")),
    item("astaghfirullah", "Astaghfirullah", Some("أستغفر الله")),
    item("salavat", "Salawat upon the Prophet ﷺ", Some("اللهم صل على محمد")),
    item("dua", "Dua", Some("الدعاء")),
    item("morning_azkar", "Morning adhkar", Some("أذكار الصباح")),
    item("evening_azkar", "Evening adhkar", Some("أذكار المساء")),
    item("parents", "Kindness to parents", None),
];

pub const QURAN: &[ChecklistItem] = &[
    item("q_arabic", "Recitation in Arabic", None),
    item("q_revision", "Revision of memorised juz", Some("مراجعة الأجزاء")),
    item("q_translation", "Reading a translation", Some("قراءة ترجمة القرآن")),
];

pub const SURAHS: &[&str] = &[
    "Al-Fatiha",
    "Al-Baqarah",
    "Al-Imran",
    "An-Nisa",
    "Al-Ma'idah",
    "Ya-Sin",
    "Ar-Rahman",
    "Al-Mulk",
    "Al-Ikhlas",
    "Al-Falaq",
    "An-Nas",
];

pub const JUZ_COUNT: u8 = 30;

pub fn juz_label(n: u8) -> String {
    format!("Juz {}", n)
}

pub fn juz_labels() -> Vec<String> {
    (1..=JUZ_COUNT).map(juz_label).collect()
}

/// Fixed checklist for a list field. Surah and juz lists are open-ended
/// markers and have no item catalog.
pub fn catalog(list: ListField) -> &'static [ChecklistItem] {
    match list {
        ListField::CompletedPrayers => FARD,
        ListField::CompletedSunnah => SUNNAH,
        ListField::CompletedAdditional => ADDITIONAL,
        ListField::CompletedPractices => PRACTICES,
        ListField::CompletedQuran => QURAN,
        ListField::RepeatedSurahs | ListField::RepeatedJuzs => &[],
    }
}

pub fn is_known_id(list: ListField, id: &str) -> bool {
    match list {
        ListField::RepeatedSurahs => SURAHS.contains(&id),
        ListField::RepeatedJuzs => juz_labels().iter().any(|j| j == id),
        _ => catalog(list).iter().any(|i| i.id == id),
    }
}

pub fn find(list: ListField, id: &str) -> Option<&'static ChecklistItem> {
    catalog(list).iter().find(|i| i.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fard_has_five_prayers() {
        assert_eq!(FARD.len(), 5);
        assert_eq!(
            FARD.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec!["fajr", "dhuhr", "asr", "maghrib", "isha"]
        );
    }

    #[test]
    fn test_known_ids() {
        assert!(is_known_id(ListField::CompletedPrayers, "maghrib"));
        assert!(!is_known_id(ListField::CompletedPrayers, "zuhr"));
        assert!(is_known_id(ListField::CompletedQuran, "q_revision"));
        assert!(is_known_id(ListField::RepeatedSurahs, "Al-Mulk"));
        assert!(is_known_id(ListField::RepeatedJuzs, "Juz 30"));
        assert!(!is_known_id(ListField::RepeatedJuzs, "Juz 31"));
    }

    #[test]
    fn test_find_item() {
        let item = find(ListField::CompletedAdditional, "tahajjud").unwrap();
        assert_eq!(item.name, "Tahajjud");
        assert!(find(ListField::RepeatedSurahs, "Al-Mulk").is_none());
    }

    #[test]
    fn test_juz_labels() {
        let labels = juz_labels();
        assert_eq!(labels.len(), 30);
        assert_eq!(labels[0], "Juz 1");
        assert_eq!(labels[29], "Juz 30");
    }
}
