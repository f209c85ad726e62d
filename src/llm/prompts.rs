use crate::category::Category;

/// Prompt for the first pass: list the qualifying institutions of one
/// category in one country, constrained by the listing rules and the
/// category membership test.
pub fn build_primary_prompt(country: &str, category: Category, max_items: usize) -> String {
    format!(
        "You are an expert in electricity-sector institutional structures.\n\n\
         Country: {country}\n\
         Category required: {key} ({desc})\n\n\
         Decision process (follow strictly):\n\
         1) Determine the institutional structure relevant to this category:\n\
         \x20  - Centralized single national body\n\
         \x20  - Multiple legally designated bodies by region\n\
         \x20  - ISO/RTO structure (regional system operators)\n\
         \x20  - Split authority across multiple formal agencies\n\n\
         2) Listing rules:\n\
         - If centralized: return ONLY the single primary national-level institution.\n\
         - If multiple legally designated bodies exist: return ALL primary bodies (national or \
         formally designated regions), but do not exceed max.\n\
         - If ISO/RTO structure exists (e.g., US): return the primary regional system operators \
         (avoid minor/subregional ones), but do not exceed max.\n\
         - Never list provincial/municipal entities.\n\
         - Never list NGOs, industry associations, donor programs, or advisory councils.\n\n\
         Category tests:\n{tests}\n\
         Hard cap: Return no more than {max_items} items.\n\
         If none exists for this category, return items as an empty array.\n\n\
         Output requirements:\n\
         - Return JSON only.\n\
         - For each item, you MUST return ALL fields (use empty string \"\" when unknown):\n\
         \x20 name, also_known_as, official_website, confidence, evidence, comment\n\
         - confidence must be HIGH, MED, or LOW.\n",
        country = country,
        key = category.key(),
        desc = category.description(),
        tests = category.test_block(),
        max_items = max_items,
    )
}

/// Prompt for the optional second pass: confirm or correct a single
/// candidate, or return an empty array if no qualifying institution exists.
pub fn build_verify_prompt(country: &str, category: Category, candidate_name: &str) -> String {
    format!(
        "You are validating a candidate institution name for a country and category.\n\n\
         Country: {country}\n\
         Category: {key} ({desc})\n\
         Candidate: {candidate_name}\n\n\
         Task:\n\
         If the candidate is truly a correct primary match for the category, keep it (may \
         correct official naming).\n\
         If not, replace it with the correct primary institution (or return empty if none \
         exists).\n\n\
         Rules:\n\
         - Do not overlist. Prefer only primary bodies.\n\
         - Never mix categories.\n\
         {tests}\n\
         - Return JSON only.\n\
         - You MUST return ALL fields (use empty string \"\" when unknown):\n\
         \x20 name, also_known_as, official_website, confidence, evidence, comment\n\
         - confidence MUST be HIGH, MED, or LOW.\n",
        country = country,
        key = category.key(),
        desc = category.description(),
        candidate_name = candidate_name,
        tests = category.test_block(),
    )
}
