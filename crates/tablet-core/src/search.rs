use crate::types::{CaseFile, CaseStatus, Charge, ChargeClass, Citizen, CitizenStatus, LookupRecord, PenalCodeCategory};

fn matches(haystack: &str, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || haystack.to_lowercase().contains(&needle)
}

/// Cases still needing attention (anything not closed).
pub fn open_cases(cases: &[CaseFile]) -> Vec<&CaseFile> {
    cases.iter().filter(|c| c.status != CaseStatus::Closed).collect()
}

pub fn filter_citizens<'a>(citizens: &'a [Citizen], query: &str, only_wanted: bool) -> Vec<&'a Citizen> {
    citizens
        .iter()
        .filter(|c| !only_wanted || c.status == CitizenStatus::Wanted)
        .filter(|c| {
            let haystack = format!(
                "{} {} {}",
                c.name,
                c.id,
                c.affiliation.as_deref().unwrap_or("")
            );
            matches(&haystack, query)
        })
        .collect()
}

/// Filters charges by class and text; categories left without charges are dropped.
pub fn filter_penal_code(
    categories: &[PenalCodeCategory],
    query: &str,
    class: Option<ChargeClass>,
) -> Vec<PenalCodeCategory> {
    categories
        .iter()
        .map(|category| PenalCodeCategory {
            charges: category
                .charges
                .iter()
                .filter(|c| class.map_or(true, |wanted| c.class == wanted))
                .filter(|c| matches(&format!("{} {} {}", c.code, c.title, c.description), query))
                .cloned()
                .collect(),
            ..category.clone()
        })
        .filter(|category| !category.charges.is_empty())
        .collect()
}

pub fn filter_lookup<'a>(records: &'a [LookupRecord], query: &str) -> Vec<&'a LookupRecord> {
    records
        .iter()
        .filter(|r| matches(&format!("{} {} {}", r.name, r.detail, r.id), query))
        .collect()
}

pub fn find_charge<'a>(categories: &'a [PenalCodeCategory], code: &str) -> Option<&'a Charge> {
    categories
        .iter()
        .flat_map(|c| c.charges.iter())
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

pub fn find_citizen<'a>(citizens: &'a [Citizen], id: &str) -> Option<&'a Citizen> {
    citizens.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_open_cases() {
        let cases = fixtures::case_files();
        let open: Vec<&str> = open_cases(&cases).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(open, vec!["EXP-2093", "EXP-2089"]);
    }

    #[test]
    fn test_filter_citizens() {
        let citizens = fixtures::citizens();
        assert_eq!(filter_citizens(&citizens, "", false).len(), 4);
        assert_eq!(filter_citizens(&citizens, "", true).len(), 1);
        assert_eq!(filter_citizens(&citizens, "  TAXI ", false)[0].id, "CID-1845");
        assert_eq!(filter_citizens(&citizens, "cid-1182", false)[0].name, "Camila Duarte");
        assert!(filter_citizens(&citizens, "camila", true).is_empty());
    }

    #[test]
    fn test_filter_penal_code() {
        let catalog = fixtures::penal_code();
        let felonies = filter_penal_code(&catalog, "", Some(ChargeClass::Felony));
        let count: usize = felonies.iter().map(|c| c.charges.len()).sum();
        assert_eq!(count, 3);

        let racing = filter_penal_code(&catalog, "racing", None);
        assert_eq!(racing.len(), 1);
        assert_eq!(racing[0].id, "traffic");
        assert_eq!(racing[0].charges[0].code, "T-250");

        assert!(filter_penal_code(&catalog, "racing", Some(ChargeClass::Minor)).is_empty());
    }

    #[test]
    fn test_filter_lookup_and_find() {
        let records = fixtures::lookup_records();
        assert_eq!(filter_lookup(&records, "plt")[0].id, "PLT-9821");
        assert_eq!(filter_lookup(&records, "").len(), 3);

        let catalog = fixtures::penal_code();
        assert_eq!(find_charge(&catalog, "f-360").map(|c| c.time), Some(28));
        assert!(find_charge(&catalog, "Z-999").is_none());
        assert!(find_citizen(&fixtures::citizens(), "CID-2099").is_some());
    }
}
