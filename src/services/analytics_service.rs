// src/services/analytics_service.rs

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BookingRepository,
    models::{
        analytics::{
            AdventureRanking, AnalyticsQuery, AnalyticsReport, CountryShare, DashboardSummary,
            DateWindow, FacetOptions, FilterOption, MetricChanges, MonthlyPoint, PaymentBreakdown,
            PeriodMetrics, PeriodPreset, PeriodWindows, StatusBreakdown,
        },
        booking::{Booking, BookingListQuery, BookingStatus, PaymentStatus},
    },
};

pub const DEFAULT_TOP_ADVENTURES: usize = 5;
const UNKNOWN_COUNTRY: &str = "Desconhecido";

#[derive(Clone)]
pub struct AnalyticsService {
    repo: BookingRepository,
}

impl AnalyticsService {
    pub fn new(repo: BookingRepository) -> Self {
        Self { repo }
    }

    pub async fn report<'e, E>(
        &self,
        executor: E,
        query: &AnalyticsQuery,
        today: NaiveDate,
    ) -> Result<AnalyticsReport, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bookings = self.repo.list(executor, &BookingListQuery::default()).await?;
        tracing::debug!("📊 Agregando {} reservas (período {:?})", bookings.len(), query.period);
        Ok(build_report(&bookings, query, today))
    }

    pub async fn facet_options<'e, E>(&self, executor: E) -> Result<FacetOptions, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bookings = self.repo.list(executor, &BookingListQuery::default()).await?;
        Ok(facet_options(&bookings))
    }

    pub async fn dashboard_summary<'e, E>(
        &self,
        executor: E,
        today: NaiveDate,
    ) -> Result<DashboardSummary, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bookings = self.repo.list(executor, &BookingListQuery::default()).await?;
        Ok(dashboard_summary(&bookings, today))
    }
}

// =============================================================================
//  PERÍODOS
// =============================================================================

fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(NaiveDate::MIN)
}

fn days_back(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Resolve as janelas (atual e de comparação) de um preset, a partir de `today`.
pub fn period_windows(preset: PeriodPreset, today: NaiveDate) -> PeriodWindows {
    // Fim exclusivo: amanhã
    let end = today.succ_opt().unwrap_or(today);

    let by_days = |n: u64| {
        let start = days_back(end, n);
        PeriodWindows {
            current: Some(DateWindow { start, end }),
            previous: Some(DateWindow { start: days_back(start, n), end: start }),
        }
    };
    let by_months = |n: u32| {
        let start = months_back(end, n);
        PeriodWindows {
            current: Some(DateWindow { start, end }),
            previous: Some(DateWindow { start: months_back(start, n), end: start }),
        }
    };

    match preset {
        PeriodPreset::Last7Days => by_days(7),
        PeriodPreset::Last30Days => by_days(30),
        PeriodPreset::Last3Months => by_months(3),
        PeriodPreset::Last6Months => by_months(6),
        PeriodPreset::Last12Months => by_months(12),
        PeriodPreset::YearToDate => {
            let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            PeriodWindows {
                current: Some(DateWindow { start, end }),
                previous: Some(DateWindow {
                    start: months_back(start, 12),
                    end: months_back(end, 12),
                }),
            }
        }
        PeriodPreset::All => PeriodWindows { current: None, previous: None },
    }
}

// =============================================================================
//  FILTROS
// =============================================================================

fn same_country(booking_country: Option<&str>, wanted: &str) -> bool {
    booking_country.is_some_and(|c| c.trim().eq_ignore_ascii_case(wanted.trim()))
}

/// Aplica os cinco filtros independentes. Filtro ausente = todos.
pub fn matches_facets(booking: &Booking, query: &AnalyticsQuery) -> bool {
    query.adventure_id.is_none_or(|id| booking.adventure_id == id)
        && query.agency_id.is_none_or(|id| booking.agency_id == Some(id))
        && query.payment_status.is_none_or(|ps| booking.payment_status == ps)
        && query.status.is_none_or(|st| booking.status == st)
        && query
            .country
            .as_deref()
            .is_none_or(|c| same_country(booking.country.as_deref(), c))
}

fn in_window(booking: &Booking, window: Option<DateWindow>) -> bool {
    window.is_none_or(|w| w.contains(booking.booking_date))
}

// =============================================================================
//  MÉTRICAS
// =============================================================================

/// Receita = soma apenas dos status contabilizados.
pub fn revenue_of<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Decimal {
    bookings
        .into_iter()
        .filter(|b| b.status.is_counted())
        .map(|b| b.total_amount)
        .sum()
}

pub fn compute_metrics(bookings: &[&Booking]) -> PeriodMetrics {
    let revenue = revenue_of(bookings.iter().copied());
    let count = bookings.len() as u64;
    let participants = bookings.iter().map(|b| b.participants()).sum();
    let average_ticket = if count == 0 {
        Decimal::ZERO
    } else {
        (revenue / Decimal::from(count)).round_dp(2)
    };

    PeriodMetrics {
        revenue,
        bookings: count,
        participants,
        average_ticket,
    }
}

/// Variação percentual entre períodos: "0%", "+100%", "+10%", "-25%".
pub fn calculate_change(current: Decimal, previous: Decimal) -> String {
    if previous.is_zero() {
        return if current.is_zero() { "0%".to_string() } else { "+100%".to_string() };
    }

    let change = ((current - previous) / previous.abs() * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    if change.is_zero() {
        "0%".to_string()
    } else if change.is_sign_positive() {
        format!("+{}%", change.normalize())
    } else {
        format!("{}%", change.normalize())
    }
}

pub fn metric_changes(current: &PeriodMetrics, previous: &PeriodMetrics) -> MetricChanges {
    MetricChanges {
        revenue: calculate_change(current.revenue, previous.revenue),
        bookings: calculate_change(current.bookings.into(), previous.bookings.into()),
        participants: calculate_change(current.participants.into(), previous.participants.into()),
        average_ticket: calculate_change(current.average_ticket, previous.average_ticket),
    }
}

// =============================================================================
//  SÉRIES E QUEBRAS
// =============================================================================

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Série mensal cobrindo todos os meses da janela (meses vazios zerados).
pub fn monthly_series(bookings: &[&Booking], window: Option<DateWindow>) -> Vec<MonthlyPoint> {
    let bounds = match window {
        Some(w) => Some((w.start, w.end.pred_opt().unwrap_or(w.end))),
        None => bookings
            .iter()
            .map(|b| b.booking_date)
            .min()
            .zip(bookings.iter().map(|b| b.booking_date).max()),
    };

    let Some((first, last)) = bounds else {
        return Vec::new();
    };

    let mut buckets: BTreeMap<NaiveDate, MonthlyPoint> = BTreeMap::new();
    let mut month = first_of_month(first);
    let last_month = first_of_month(last);
    while month <= last_month {
        buckets.insert(
            month,
            MonthlyPoint {
                month: month_key(month),
                revenue: Decimal::ZERO,
                bookings: 0,
                participants: 0,
            },
        );
        match month.checked_add_months(Months::new(1)) {
            Some(next) => month = next,
            None => break,
        }
    }

    for booking in bookings {
        if let Some(point) = buckets.get_mut(&first_of_month(booking.booking_date)) {
            point.bookings += 1;
            point.participants += booking.participants();
            if booking.status.is_counted() {
                point.revenue += booking.total_amount;
            }
        }
    }

    buckets.into_values().collect()
}

pub fn status_breakdown(bookings: &[&Booking]) -> Vec<StatusBreakdown> {
    BookingStatus::ALL
        .into_iter()
        .map(|status| {
            let matching = bookings.iter().filter(|b| b.status == status);
            StatusBreakdown {
                status,
                count: matching.clone().count() as u64,
                amount: matching.map(|b| b.total_amount).sum(),
            }
        })
        .collect()
}

pub fn payment_breakdown(bookings: &[&Booking]) -> Vec<PaymentBreakdown> {
    PaymentStatus::ALL
        .into_iter()
        .map(|payment_status| {
            let matching = bookings.iter().filter(|b| b.payment_status == payment_status);
            PaymentBreakdown {
                payment_status,
                count: matching.clone().count() as u64,
                amount: matching.map(|b| b.total_amount).sum(),
            }
        })
        .collect()
}

/// Ranking por número de reservas; empate resolvido pelo nome.
pub fn top_adventures(bookings: &[&Booking], limit: usize) -> Vec<AdventureRanking> {
    let mut by_adventure: HashMap<Uuid, AdventureRanking> = HashMap::new();

    for booking in bookings {
        let entry = by_adventure
            .entry(booking.adventure_id)
            .or_insert_with(|| AdventureRanking {
                adventure_id: booking.adventure_id,
                adventure_name: booking.adventure_name.clone().unwrap_or_default(),
                bookings: 0,
                revenue: Decimal::ZERO,
            });
        entry.bookings += 1;
        if booking.status.is_counted() {
            entry.revenue += booking.total_amount;
        }
    }

    let mut ranking: Vec<AdventureRanking> = by_adventure.into_values().collect();
    ranking.sort_by(|a, b| {
        b.bookings
            .cmp(&a.bookings)
            .then_with(|| a.adventure_name.cmp(&b.adventure_name))
    });
    ranking.truncate(limit);
    ranking
}

pub fn revenue_by_country(bookings: &[&Booking]) -> Vec<CountryShare> {
    let mut by_country: HashMap<String, Decimal> = HashMap::new();
    for booking in bookings.iter().filter(|b| b.status.is_counted()) {
        let country = booking
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_COUNTRY)
            .to_string();
        *by_country.entry(country).or_insert(Decimal::ZERO) += booking.total_amount;
    }

    let total: Decimal = by_country.values().copied().sum();
    if total.is_zero() {
        return Vec::new();
    }

    let mut shares: Vec<CountryShare> = by_country
        .into_iter()
        .filter(|(_, revenue)| !revenue.is_zero())
        .map(|(country, revenue)| {
            let percentage = (revenue / total * Decimal::ONE_HUNDRED)
                .round_dp(1)
                .to_f64()
                .unwrap_or(0.0);
            CountryShare { country, revenue, percentage }
        })
        .collect();

    shares.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.country.cmp(&b.country)));
    shares
}

// =============================================================================
//  RELATÓRIOS
// =============================================================================

pub fn build_report(bookings: &[Booking], query: &AnalyticsQuery, today: NaiveDate) -> AnalyticsReport {
    let windows = period_windows(query.period, today);

    let filtered: Vec<&Booking> = bookings.iter().filter(|b| matches_facets(b, query)).collect();

    let current: Vec<&Booking> = filtered
        .iter()
        .copied()
        .filter(|b| in_window(b, windows.current))
        .collect();

    // Sem janela anterior (preset "all") o período de comparação é vazio
    let previous: Vec<&Booking> = match windows.previous {
        Some(window) => filtered
            .iter()
            .copied()
            .filter(|b| window.contains(b.booking_date))
            .collect(),
        None => Vec::new(),
    };

    let current_metrics = compute_metrics(&current);
    let previous_metrics = compute_metrics(&previous);
    let changes = metric_changes(&current_metrics, &previous_metrics);

    AnalyticsReport {
        period: query.period,
        windows,
        monthly: monthly_series(&current, windows.current),
        by_status: status_breakdown(&current),
        by_payment_status: payment_breakdown(&current),
        top_adventures: top_adventures(&current, query.top.unwrap_or(DEFAULT_TOP_ADVENTURES)),
        revenue_by_country: revenue_by_country(&current),
        current: current_metrics,
        previous: previous_metrics,
        changes,
    }
}

pub fn facet_options(bookings: &[Booking]) -> FacetOptions {
    let mut adventures: BTreeMap<Uuid, String> = BTreeMap::new();
    let mut agencies: BTreeMap<Uuid, String> = BTreeMap::new();
    let mut countries: Vec<String> = Vec::new();

    for booking in bookings {
        adventures
            .entry(booking.adventure_id)
            .or_insert_with(|| booking.adventure_name.clone().unwrap_or_default());
        if let Some(agency_id) = booking.agency_id {
            agencies
                .entry(agency_id)
                .or_insert_with(|| booking.agency_name.clone().unwrap_or_default());
        }
        if let Some(country) = booking.country.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            countries.push(country.to_string());
        }
    }

    countries.sort();
    countries.dedup();

    let to_options = |map: BTreeMap<Uuid, String>| {
        let mut options: Vec<FilterOption> = map
            .into_iter()
            .map(|(id, name)| FilterOption { id, name })
            .collect();
        options.sort_by(|a, b| a.name.cmp(&b.name));
        options
    };

    FacetOptions {
        adventures: to_options(adventures),
        agencies: to_options(agencies),
        countries,
        statuses: BookingStatus::ALL.to_vec(),
        payment_statuses: PaymentStatus::ALL.to_vec(),
    }
}

pub fn dashboard_summary(bookings: &[Booking], today: NaiveDate) -> DashboardSummary {
    let active = || bookings.iter().filter(|b| b.status != BookingStatus::Cancelada);

    let today_list: Vec<&Booking> = active().filter(|b| b.activity_date == today).collect();
    let week_end = today.checked_add_days(Days::new(7)).unwrap_or(today);
    let upcoming_week = active()
        .filter(|b| b.activity_date > today && b.activity_date <= week_end)
        .count() as u64;

    let pending: Vec<&Booking> = active()
        .filter(|b| matches!(b.payment_status, PaymentStatus::Pendente | PaymentStatus::Parcial))
        .collect();

    let report = build_report(
        bookings,
        &AnalyticsQuery { period: PeriodPreset::Last30Days, ..Default::default() },
        today,
    );

    DashboardSummary {
        activities_today: today_list.len() as u64,
        participants_today: today_list.iter().map(|b| b.participants()).sum(),
        upcoming_week,
        pending_payments: pending.len() as u64,
        pending_amount: pending.iter().map(|b| b.total_amount).sum(),
        last_30_days: report.current,
        changes: report.changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("data válida")
    }

    fn booking(status: BookingStatus, total: i64, booked: NaiveDate) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            client_name: "Cliente".into(),
            client_email: None,
            client_phone: None,
            adventure_id: Uuid::nil(),
            adventure_name: Some("Passeio de Barco".into()),
            agency_id: None,
            agency_name: None,
            booking_date: booked,
            activity_date: booked,
            adults: 2,
            children: 1,
            babies: 0,
            total_amount: Decimal::from(total),
            status,
            payment_status: PaymentStatus::Pago,
            country: Some("Portugal".into()),
            guide_id: None,
            driver_id: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn change_is_zero_when_both_periods_are_empty() {
        assert_eq!(calculate_change(dec(0), dec(0)), "0%");
    }

    #[test]
    fn change_is_plus_hundred_when_previous_is_zero() {
        assert_eq!(calculate_change(dec(5), dec(0)), "+100%");
        assert_eq!(calculate_change(dec(1), dec(0)), "+100%");
    }

    #[test]
    fn change_is_rounded_percentage() {
        assert_eq!(calculate_change(dec(110), dec(100)), "+10%");
        assert_eq!(calculate_change(dec(90), dec(100)), "-10%");
        assert_eq!(calculate_change(dec(100), dec(100)), "0%");
        assert_eq!(calculate_change(dec(2), dec(3)), "-33%");
        assert_eq!(calculate_change(dec(300), dec(200)), "+50%");
    }

    #[test]
    fn cancelled_bookings_do_not_count_as_revenue() {
        let today = date(2026, 5, 10);
        let bookings = [
            booking(BookingStatus::Confirmada, 100, today),
            booking(BookingStatus::Cancelada, 50, today),
        ];
        let refs: Vec<&Booking> = bookings.iter().collect();
        let metrics = compute_metrics(&refs);

        assert_eq!(metrics.revenue, dec(100));
        assert_eq!(metrics.bookings, 2);
        assert_eq!(metrics.average_ticket, dec(50));
        assert_eq!(metrics.participants, 6);
    }

    #[test]
    fn pending_bookings_are_not_counted_but_completed_are() {
        let today = date(2026, 5, 10);
        let bookings = [
            booking(BookingStatus::Pendente, 70, today),
            booking(BookingStatus::Concluida, 30, today),
        ];
        assert_eq!(revenue_of(&bookings), dec(30));
    }

    #[test]
    fn empty_metrics_have_zero_average() {
        let metrics = compute_metrics(&[]);
        assert_eq!(metrics.revenue, Decimal::ZERO);
        assert_eq!(metrics.bookings, 0);
        assert_eq!(metrics.average_ticket, Decimal::ZERO);
    }

    #[test]
    fn three_month_preset_compares_with_preceding_three_months() {
        let windows = period_windows(PeriodPreset::Last3Months, date(2026, 6, 15));
        let current = windows.current.expect("janela atual");
        let previous = windows.previous.expect("janela anterior");

        assert_eq!(current.start, date(2026, 3, 16));
        assert_eq!(current.end, date(2026, 6, 16));
        assert_eq!(previous.start, date(2025, 12, 16));
        assert_eq!(previous.end, current.start);
    }

    #[test]
    fn day_presets_include_today() {
        let today = date(2026, 1, 3);
        let windows = period_windows(PeriodPreset::Last7Days, today);
        let current = windows.current.expect("janela atual");
        assert!(current.contains(today));
        assert!(current.contains(date(2025, 12, 28)));
        assert!(!current.contains(date(2025, 12, 27)));
        assert!(windows.previous.expect("anterior").contains(date(2025, 12, 27)));
    }

    #[test]
    fn year_to_date_compares_with_same_span_last_year() {
        let windows = period_windows(PeriodPreset::YearToDate, date(2026, 4, 20));
        assert_eq!(windows.current.map(|w| w.start), Some(date(2026, 1, 1)));
        assert_eq!(windows.previous.map(|w| w.start), Some(date(2025, 1, 1)));
        assert_eq!(windows.previous.map(|w| w.end), Some(date(2025, 4, 21)));
    }

    #[test]
    fn all_preset_has_no_comparison() {
        let today = date(2026, 5, 10);
        let bookings = [
            booking(BookingStatus::Confirmada, 100, date(2020, 1, 1)),
            booking(BookingStatus::Confirmada, 100, today),
        ];
        let query = AnalyticsQuery { period: PeriodPreset::All, ..Default::default() };
        let report = build_report(&bookings, &query, today);

        assert_eq!(report.current.bookings, 2);
        assert_eq!(report.previous.bookings, 0);
        assert_eq!(report.changes.bookings, "+100%");
        assert_eq!(report.monthly.first().map(|p| p.month.as_str()), Some("2020-01"));
        assert_eq!(report.monthly.last().map(|p| p.month.as_str()), Some("2026-05"));
    }

    #[test]
    fn report_splits_current_and_previous_periods() {
        let today = date(2026, 5, 10);
        let bookings = [
            booking(BookingStatus::Confirmada, 110, date(2026, 5, 1)),
            booking(BookingStatus::Confirmada, 100, date(2026, 4, 1)),
            booking(BookingStatus::Confirmada, 999, date(2025, 1, 1)),
        ];
        let report = build_report(&bookings, &AnalyticsQuery::default(), today);

        assert_eq!(report.current.revenue, dec(110));
        assert_eq!(report.previous.revenue, dec(100));
        assert_eq!(report.changes.revenue, "+10%");
        assert_eq!(report.changes.bookings, "0%");
    }

    #[test]
    fn facets_filter_independently() {
        let today = date(2026, 5, 10);
        let agency = Uuid::new_v4();
        let mut spain = booking(BookingStatus::Confirmada, 40, today);
        spain.country = Some("Espanha".into());
        spain.agency_id = Some(agency);
        let mut unpaid = booking(BookingStatus::Confirmada, 60, today);
        unpaid.payment_status = PaymentStatus::Pendente;
        let bookings = [spain, unpaid, booking(BookingStatus::Cancelada, 10, today)];

        let by_country = AnalyticsQuery { country: Some(" espanha".into()), ..Default::default() };
        assert_eq!(build_report(&bookings, &by_country, today).current.revenue, dec(40));

        let by_agency = AnalyticsQuery { agency_id: Some(agency), ..Default::default() };
        assert_eq!(build_report(&bookings, &by_agency, today).current.bookings, 1);

        let by_payment = AnalyticsQuery {
            payment_status: Some(PaymentStatus::Pendente),
            ..Default::default()
        };
        assert_eq!(build_report(&bookings, &by_payment, today).current.revenue, dec(60));

        let by_status = AnalyticsQuery { status: Some(BookingStatus::Cancelada), ..Default::default() };
        let report = build_report(&bookings, &by_status, today);
        assert_eq!(report.current.bookings, 1);
        assert_eq!(report.current.revenue, Decimal::ZERO);
    }

    #[test]
    fn monthly_series_is_zero_filled() {
        let today = date(2026, 5, 10);
        let bookings = [booking(BookingStatus::Confirmada, 100, date(2026, 3, 20))];
        let query = AnalyticsQuery { period: PeriodPreset::Last3Months, ..Default::default() };
        let report = build_report(&bookings, &query, today);

        let months: Vec<&str> = report.monthly.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, ["2026-02", "2026-03", "2026-04", "2026-05"]);
        assert_eq!(report.monthly[1].revenue, dec(100));
        assert_eq!(report.monthly[0].bookings, 0);
    }

    #[test]
    fn top_adventures_ranks_by_count_then_name() {
        let today = date(2026, 5, 10);
        let kayak = Uuid::new_v4();
        let mut bookings = vec![
            booking(BookingStatus::Confirmada, 10, today),
            booking(BookingStatus::Confirmada, 10, today),
        ];
        for _ in 0..3 {
            let mut b = booking(BookingStatus::Pendente, 10, today);
            b.adventure_id = kayak;
            b.adventure_name = Some("Caiaque".into());
            bookings.push(b);
        }
        let refs: Vec<&Booking> = bookings.iter().collect();

        let ranking = top_adventures(&refs, 5);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].adventure_name, "Caiaque");
        assert_eq!(ranking[0].bookings, 3);
        assert_eq!(ranking[0].revenue, Decimal::ZERO);
        assert_eq!(top_adventures(&refs, 1).len(), 1);
    }

    #[test]
    fn top_adventures_break_ties_alphabetically() {
        let today = date(2026, 5, 10);
        let mut bookings = Vec::new();
        // Inseridas fora de ordem, todas com duas reservas
        for name in ["Trilho da Costa", "Bicicleta na Serra", "Mergulho"] {
            let id = Uuid::new_v4();
            for _ in 0..2 {
                let mut b = booking(BookingStatus::Confirmada, 10, today);
                b.adventure_id = id;
                b.adventure_name = Some(name.into());
                bookings.push(b);
            }
        }
        let refs: Vec<&Booking> = bookings.iter().collect();

        let names: Vec<String> = top_adventures(&refs, 5).into_iter().map(|r| r.adventure_name).collect();
        assert_eq!(names, ["Bicicleta na Serra", "Mergulho", "Trilho da Costa"]);

        let first_two: Vec<String> = top_adventures(&refs, 2).into_iter().map(|r| r.adventure_name).collect();
        assert_eq!(first_two, ["Bicicleta na Serra", "Mergulho"]);
    }

    #[test]
    fn country_share_uses_counted_revenue_only() {
        let today = date(2026, 5, 10);
        let mut fr = booking(BookingStatus::Confirmada, 25, today);
        fr.country = Some("França".into());
        let mut cancelled = booking(BookingStatus::Cancelada, 1000, today);
        cancelled.country = Some("Brasil".into());
        let bookings = [booking(BookingStatus::Confirmada, 75, today), fr, cancelled];
        let refs: Vec<&Booking> = bookings.iter().collect();

        let shares = revenue_by_country(&refs);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].country, "Portugal");
        assert_eq!(shares[0].percentage, 75.0);
        assert_eq!(shares[1].percentage, 25.0);
    }

    #[test]
    fn status_breakdown_lists_every_status() {
        let today = date(2026, 5, 10);
        let bookings = [booking(BookingStatus::Cancelada, 50, today)];
        let refs: Vec<&Booking> = bookings.iter().collect();

        let breakdown = status_breakdown(&refs);
        assert_eq!(breakdown.len(), 4);
        let cancelled = breakdown
            .iter()
            .find(|s| s.status == BookingStatus::Cancelada)
            .expect("status presente");
        assert_eq!(cancelled.count, 1);
        assert_eq!(cancelled.amount, dec(50));
    }

    #[test]
    fn dashboard_summary_ignores_cancelled_activities() {
        let today = date(2026, 5, 10);
        let mut tomorrow = booking(BookingStatus::Confirmada, 10, today);
        tomorrow.activity_date = date(2026, 5, 11);
        tomorrow.payment_status = PaymentStatus::Parcial;
        let bookings = [
            booking(BookingStatus::Confirmada, 10, today),
            booking(BookingStatus::Cancelada, 10, today),
            tomorrow,
        ];

        let summary = dashboard_summary(&bookings, today);
        assert_eq!(summary.activities_today, 1);
        assert_eq!(summary.participants_today, 3);
        assert_eq!(summary.upcoming_week, 1);
        assert_eq!(summary.pending_payments, 1);
        assert_eq!(summary.pending_amount, dec(10));
        assert_eq!(summary.last_30_days.bookings, 3);
    }

    #[test]
    fn facet_options_are_distinct_and_sorted() {
        let today = date(2026, 5, 10);
        let mut other = booking(BookingStatus::Confirmada, 10, today);
        other.country = Some("Alemanha".into());
        let bookings = [booking(BookingStatus::Confirmada, 10, today), booking(BookingStatus::Pendente, 10, today), other];

        let options = facet_options(&bookings);
        assert_eq!(options.adventures.len(), 1);
        assert_eq!(options.countries, ["Alemanha", "Portugal"]);
        assert!(options.agencies.is_empty());
    }
}
