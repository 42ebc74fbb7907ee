use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::company::Company;

/// Large-cap names listed ahead of the generated filler entries.
pub const NAMED_COMPANIES: [(&str, &str); 50] = [
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("AMZN", "Amazon.com Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("GOOGL", "Alphabet Inc. Class A"),
    ("GOOG", "Alphabet Inc. Class C"),
    ("META", "Meta Platforms Inc."),
    ("TSLA", "Tesla Inc."),
    ("BRK.B", "Berkshire Hathaway Inc. Class B"),
    ("UNH", "UnitedHealth Group Inc."),
    ("JNJ", "Johnson & Johnson"),
    ("JPM", "JPMorgan Chase & Co."),
    ("V", "Visa Inc."),
    ("PG", "Procter & Gamble Co."),
    ("MA", "Mastercard Inc."),
    ("HD", "Home Depot Inc."),
    ("CVX", "Chevron Corporation"),
    ("MRK", "Merck & Co. Inc."),
    ("ABBV", "AbbVie Inc."),
    ("PFE", "Pfizer Inc."),
    ("AVGO", "Broadcom Inc."),
    ("COST", "Costco Wholesale Corporation"),
    ("BAC", "Bank of America Corp."),
    ("KO", "Coca-Cola Co."),
    ("PEP", "PepsiCo Inc."),
    ("TMO", "Thermo Fisher Scientific Inc."),
    ("CSCO", "Cisco Systems Inc."),
    ("ABT", "Abbott Laboratories"),
    ("CMCSA", "Comcast Corporation"),
    ("ADBE", "Adobe Inc."),
    ("CRM", "Salesforce Inc."),
    ("DHR", "Danaher Corporation"),
    ("MCD", "McDonald's Corporation"),
    ("DIS", "Walt Disney Co."),
    ("VZ", "Verizon Communications Inc."),
    ("NEE", "NextEra Energy Inc."),
    ("AMD", "Advanced Micro Devices Inc."),
    ("TXN", "Texas Instruments Inc."),
    ("WMT", "Walmart Inc."),
    ("PM", "Philip Morris International Inc."),
    ("INTC", "Intel Corporation"),
    ("NFLX", "Netflix Inc."),
    ("QCOM", "QUALCOMM Inc."),
    ("T", "AT&T Inc."),
    ("PYPL", "PayPal Holdings Inc."),
    ("IBM", "International Business Machines Corp."),
    ("SBUX", "Starbucks Corporation"),
    ("BA", "Boeing Co."),
    ("GE", "General Electric Co."),
    ("F", "Ford Motor Co."),
];

const INDUSTRIES: [&str; 10] = [
    "Technology",
    "Healthcare",
    "Financial",
    "Consumer Cyclical",
    "Energy",
    "Industrial",
    "Communication",
    "Utilities",
    "Real Estate",
    "Materials",
];

/// Build the searchable company directory: the named companies followed
/// by `filler` generated entries (`S001 Technology Corp 1`, ...) with a
/// random industry each.
pub fn build_directory<R: Rng + ?Sized>(rng: &mut R, filler: usize) -> Vec<Company> {
    let mut companies: Vec<Company> = NAMED_COMPANIES
        .iter()
        .map(|(symbol, name)| Company::new(*symbol, *name))
        .collect();
    companies.reserve(filler);

    for i in 1..=filler {
        let industry = INDUSTRIES.choose(rng).copied().unwrap_or(INDUSTRIES[0]);
        companies.push(Company::new(format!("S{i:03}"), format!("{industry} Corp {i}")));
    }
    companies
}
