use rusqlite::{Connection, OptionalExtension, Params, Row, TransactionBehavior, params};

use super::{LeagueImport, LeagueStore, StorageError, WeekResults, WriteBatch};
use crate::model::{
    DrawnTeam, Golfer, GolferMatchup, GolferMatchupKey, Handicap, Hole, Matchup, Points, Round,
    Score, Season, SeasonData, SkinEntry, Sub, Team, Week,
};

/// Table name and DDL, in creation order.
pub const TABLES_AND_CREATE_SQL: &[(&str, &str)] = &[
    ("golfer", include_str!("../sql/schema/sqlite/01_golfer.sql")),
    ("season", include_str!("../sql/schema/sqlite/02_season.sql")),
    ("team", include_str!("../sql/schema/sqlite/03_team.sql")),
    ("hole", include_str!("../sql/schema/sqlite/04_hole.sql")),
    ("score", include_str!("../sql/schema/sqlite/05_score.sql")),
    ("sub", include_str!("../sql/schema/sqlite/06_sub.sql")),
    ("matchup", include_str!("../sql/schema/sqlite/07_matchup.sql")),
    ("handicap", include_str!("../sql/schema/sqlite/08_handicap.sql")),
    (
        "golfer_matchup",
        include_str!("../sql/schema/sqlite/09_golfer_matchup.sql"),
    ),
    ("points", include_str!("../sql/schema/sqlite/10_points.sql")),
    (
        "golfer_round",
        include_str!("../sql/schema/sqlite/11_golfer_round.sql"),
    ),
    (
        "drawn_team",
        include_str!("../sql/schema/sqlite/12_drawn_team.sql"),
    ),
    (
        "skin_entry",
        include_str!("../sql/schema/sqlite/13_skin_entry.sql"),
    ),
];

/// League data in a SQLite file (or `:memory:`).
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens the database and creates any missing tables.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the database cannot be opened or the schema cannot be created
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.create_schema()?;
        Ok(store)
    }

    /// # Errors
    ///
    /// Will return `Err` if the schema cannot be created
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.create_schema()?;
        Ok(store)
    }

    /// # Errors
    ///
    /// Will return `Err` if any DDL statement fails
    pub fn create_schema(&mut self) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        for (table, ddl) in TABLES_AND_CREATE_SQL {
            tx.execute_batch(ddl)
                .map_err(|e| StorageError::new(format!("creating {table}: {e}")))?;
        }
        tx.commit()?;
        Ok(())
    }

    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn select<T, P, F>(conn: &Connection, sql: &str, params: P, f: F) -> Result<Vec<T>, StorageError>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, f)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Attaches `(owner, member)` rows to their owners, keeping row order.
fn group_members(pairs: &[(i64, i64)], owner: i64) -> Vec<i64> {
    pairs
        .iter()
        .filter(|(o, _)| *o == owner)
        .map(|(_, member)| *member)
        .collect()
}

fn read_season(conn: &Connection, year: i32) -> Result<SeasonData, StorageError> {
    let found: Option<i32> = conn
        .query_row("SELECT year FROM season WHERE year = ?1", [year], |row| {
            row.get(0)
        })
        .optional()?;
    if found.is_none() {
        return Err(StorageError::new(format!("season {year} not found")));
    }

    let golfers = select(
        conn,
        "SELECT golfer_id, name FROM golfer ORDER BY golfer_id",
        params![],
        |row| {
            Ok(Golfer {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )?;

    let weeks = select(
        conn,
        "SELECT week_id, season, number, date, is_front, rained_out, num_scores
         FROM week WHERE season = ?1 ORDER BY number",
        [year],
        |row| {
            Ok(Week {
                id: row.get(0)?,
                season: row.get(1)?,
                number: row.get(2)?,
                date: row.get(3)?,
                is_front: row.get(4)?,
                rained_out: row.get(5)?,
                num_scores: row.get(6)?,
            })
        },
    )?;

    let team_golfers: Vec<(i64, i64)> = select(
        conn,
        "SELECT tg.team_id, tg.golfer_id FROM team_golfer tg
         JOIN team t ON t.team_id = tg.team_id
         WHERE t.season = ?1 ORDER BY tg.team_id, tg.position",
        [year],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    let teams = select(
        conn,
        "SELECT team_id, season FROM team WHERE season = ?1 ORDER BY team_id",
        [year],
        |row| {
            Ok(Team {
                id: row.get(0)?,
                season: row.get(1)?,
                golfers: Vec::new(),
            })
        },
    )?
    .into_iter()
    .map(|mut team: Team| {
        team.golfers = group_members(&team_golfers, team.id);
        team
    })
    .collect();

    let holes = select(
        conn,
        "SELECT hole_id, season, number, par, handicap, handicap9, yards
         FROM hole WHERE season = ?1 ORDER BY number",
        [year],
        |row| {
            Ok(Hole {
                id: row.get(0)?,
                season: row.get(1)?,
                number: row.get(2)?,
                par: row.get(3)?,
                handicap: row.get(4)?,
                handicap9: row.get(5)?,
                yards: row.get(6)?,
            })
        },
    )?;

    let scores = select(
        conn,
        "SELECT s.golfer_id, s.week_id, s.hole_id, s.score FROM score s
         JOIN week w ON w.week_id = s.week_id WHERE w.season = ?1",
        [year],
        |row| {
            Ok(Score {
                golfer: row.get(0)?,
                week: row.get(1)?,
                hole: row.get(2)?,
                score: row.get(3)?,
            })
        },
    )?;

    let subs = select(
        conn,
        "SELECT s.week_id, s.absent_golfer_id, s.sub_golfer_id, s.no_sub FROM sub s
         JOIN week w ON w.week_id = s.week_id WHERE w.season = ?1",
        [year],
        |row| {
            Ok(Sub {
                week: row.get(0)?,
                absent_golfer: row.get(1)?,
                sub_golfer: row.get(2)?,
                no_sub: row.get(3)?,
            })
        },
    )?;

    let matchup_teams: Vec<(i64, i64)> = select(
        conn,
        "SELECT mt.matchup_id, mt.team_id FROM matchup_team mt
         JOIN matchup m ON m.matchup_id = mt.matchup_id
         JOIN week w ON w.week_id = m.week_id
         WHERE w.season = ?1 ORDER BY mt.matchup_id, mt.position",
        [year],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    let matchups = select(
        conn,
        "SELECT m.matchup_id, m.week_id FROM matchup m
         JOIN week w ON w.week_id = m.week_id WHERE w.season = ?1 ORDER BY m.matchup_id",
        [year],
        |row| {
            Ok(Matchup {
                id: row.get(0)?,
                week: row.get(1)?,
                teams: Vec::new(),
            })
        },
    )?
    .into_iter()
    .map(|mut matchup: Matchup| {
        matchup.teams = group_members(&matchup_teams, matchup.id);
        matchup
    })
    .collect();

    let skin_entries = select(
        conn,
        "SELECT e.golfer_id, e.week_id FROM skin_entry e
         JOIN week w ON w.week_id = e.week_id WHERE w.season = ?1",
        [year],
        |row| {
            Ok(SkinEntry {
                golfer: row.get(0)?,
                week: row.get(1)?,
            })
        },
    )?;

    let handicaps = select(
        conn,
        "SELECT h.golfer_id, h.week_id, h.handicap FROM handicap h
         JOIN week w ON w.week_id = h.week_id WHERE w.season = ?1",
        [year],
        |row| {
            Ok(Handicap {
                golfer: row.get(0)?,
                week: row.get(1)?,
                value: row.get(2)?,
            })
        },
    )?;

    let golfer_matchups = select(
        conn,
        "SELECT g.week_id, g.golfer_id, g.opponent_id, g.is_a, g.subbing_for_golfer_id,
                g.is_teammate_subbing, g.opponent_team_no_subs
         FROM golfer_matchup g
         JOIN week w ON w.week_id = g.week_id WHERE w.season = ?1",
        [year],
        |row| {
            Ok(GolferMatchup {
                week: row.get(0)?,
                golfer: row.get(1)?,
                opponent: row.get(2)?,
                is_a: row.get(3)?,
                subbing_for: row.get(4)?,
                is_teammate_subbing: row.get(5)?,
                opponent_team_no_subs: row.get(6)?,
            })
        },
    )?;

    let points = select(
        conn,
        "SELECT p.golfer_id, p.week_id, p.hole_id, p.opponent_id, p.score, p.points
         FROM points p
         JOIN week w ON w.week_id = p.week_id WHERE w.season = ?1",
        [year],
        |row| {
            Ok(Points {
                golfer: row.get(0)?,
                week: row.get(1)?,
                hole: row.get(2)?,
                opponent: row.get(3)?,
                score: row.get(4)?,
                points: row.get(5)?,
            })
        },
    )?;

    let rounds = select(
        conn,
        "SELECT r.week_id, r.golfer_id, r.opponent_id, r.is_a, r.matchup_id, r.handicap,
                r.gross, r.net, r.round_points, r.total_points, r.is_sub,
                r.subbing_for_golfer_id
         FROM golfer_round r
         JOIN week w ON w.week_id = r.week_id WHERE w.season = ?1",
        [year],
        |row| {
            let key = GolferMatchupKey {
                week: row.get(0)?,
                golfer: row.get(1)?,
                opponent: row.get(2)?,
                is_a: row.get(3)?,
            };
            Ok(Round {
                golfer: key.golfer,
                week: key.week,
                matchup: row.get(4)?,
                golfer_matchup: key,
                handicap: row.get(5)?,
                gross: row.get(6)?,
                net: row.get(7)?,
                round_points: row.get(8)?,
                total_points: row.get(9)?,
                is_sub: row.get(10)?,
                subbing_for: row.get(11)?,
            })
        },
    )?;

    let drawn_teams = select(
        conn,
        "SELECT d.week_id, d.absent_team_id, d.drawn_team_id FROM drawn_team d
         JOIN week w ON w.week_id = d.week_id WHERE w.season = ?1",
        [year],
        |row| {
            Ok(DrawnTeam {
                week: row.get(0)?,
                absent_team: row.get(1)?,
                drawn_team: row.get(2)?,
            })
        },
    )?;

    Ok(SeasonData {
        season: Season { year },
        golfers,
        weeks,
        teams,
        holes,
        scores,
        subs,
        matchups,
        skin_entries,
        handicaps,
        golfer_matchups,
        points,
        rounds,
        drawn_teams,
    })
}

fn write_week(conn: &Connection, season: i32, week: &WeekResults) -> Result<(), StorageError> {
    let known: i64 = conn.query_row(
        "SELECT COUNT(*) FROM week WHERE week_id = ?1 AND season = ?2",
        params![week.week, season],
        |row| row.get(0),
    )?;
    if known == 0 {
        return Err(StorageError::new(format!(
            "week {} is not part of season {season}",
            week.week
        )));
    }

    conn.execute("DELETE FROM golfer_round WHERE week_id = ?1", [week.week])?;
    conn.execute("DELETE FROM points WHERE week_id = ?1", [week.week])?;
    conn.execute("DELETE FROM golfer_matchup WHERE week_id = ?1", [week.week])?;

    for gm in &week.golfer_matchups {
        conn.execute(
            "INSERT INTO golfer_matchup (week_id, golfer_id, opponent_id, is_a,
                subbing_for_golfer_id, is_teammate_subbing, opponent_team_no_subs)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                gm.week,
                gm.golfer,
                gm.opponent,
                gm.is_a,
                gm.subbing_for,
                gm.is_teammate_subbing,
                gm.opponent_team_no_subs
            ],
        )?;
    }
    for p in &week.points {
        conn.execute(
            "INSERT INTO points (golfer_id, week_id, hole_id, opponent_id, score, points)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (golfer_id, week_id, hole_id, opponent_id)
             DO UPDATE SET score = excluded.score, points = excluded.points",
            params![p.golfer, p.week, p.hole, p.opponent, p.score, p.points],
        )?;
    }
    for r in &week.rounds {
        let key = r.golfer_matchup;
        conn.execute(
            "INSERT INTO golfer_round (week_id, golfer_id, opponent_id, is_a, matchup_id,
                handicap, gross, net, round_points, total_points, is_sub, subbing_for_golfer_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             ON CONFLICT (week_id, golfer_id, opponent_id, is_a)
             DO UPDATE SET matchup_id = excluded.matchup_id, handicap = excluded.handicap,
                gross = excluded.gross, net = excluded.net,
                round_points = excluded.round_points, total_points = excluded.total_points,
                is_sub = excluded.is_sub, subbing_for_golfer_id = excluded.subbing_for_golfer_id",
            params![
                key.week,
                key.golfer,
                key.opponent,
                key.is_a,
                r.matchup,
                r.handicap,
                r.gross,
                r.net,
                r.round_points,
                r.total_points,
                r.is_sub,
                r.subbing_for
            ],
        )?;
    }
    for d in &week.drawn_teams {
        conn.execute(
            "INSERT OR IGNORE INTO drawn_team (week_id, absent_team_id, drawn_team_id)
             VALUES (?1, ?2, ?3)",
            params![d.week, d.absent_team, d.drawn_team],
        )?;
    }
    Ok(())
}

fn write_batch(conn: &Connection, batch: &WriteBatch) -> Result<(), StorageError> {
    for h in &batch.handicaps {
        conn.execute(
            "INSERT INTO handicap (golfer_id, week_id, handicap) VALUES (?1, ?2, ?3)
             ON CONFLICT (golfer_id, week_id) DO UPDATE SET handicap = excluded.handicap",
            params![h.golfer, h.week, h.value],
        )?;
    }
    for week in &batch.weeks {
        write_week(conn, batch.season, week)?;
    }
    Ok(())
}

impl LeagueStore for SqliteStore {
    fn load_season(&self, year: i32) -> Result<SeasonData, StorageError> {
        read_season(&self.conn, year)
    }

    fn apply(&mut self, batch: &WriteBatch) -> Result<(), StorageError> {
        // dropped without commit on any error, which rolls the batch back
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        write_batch(&tx, batch)?;
        tx.commit()?;
        Ok(())
    }
}

impl LeagueImport for SqliteStore {
    fn import_season(&mut self, data: &SeasonData) -> Result<(), StorageError> {
        let year = data.year();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        for g in &data.golfers {
            tx.execute(
                "INSERT INTO golfer (golfer_id, name) VALUES (?1, ?2)
                 ON CONFLICT (golfer_id) DO UPDATE SET name = excluded.name",
                params![g.id, g.name],
            )?;
        }
        tx.execute("INSERT OR IGNORE INTO season (year) VALUES (?1)", [year])?;
        for w in &data.weeks {
            tx.execute(
                "INSERT OR REPLACE INTO week
                    (week_id, season, number, date, is_front, rained_out, num_scores)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    w.id,
                    year,
                    w.number,
                    w.date,
                    w.is_front,
                    w.rained_out,
                    w.num_scores
                ],
            )?;
        }
        for t in &data.teams {
            tx.execute(
                "INSERT OR REPLACE INTO team (team_id, season) VALUES (?1, ?2)",
                params![t.id, year],
            )?;
            tx.execute("DELETE FROM team_golfer WHERE team_id = ?1", [t.id])?;
            for (position, golfer) in t.golfers.iter().enumerate() {
                tx.execute(
                    "INSERT INTO team_golfer (team_id, golfer_id, position) VALUES (?1, ?2, ?3)",
                    params![t.id, golfer, position as i64],
                )?;
            }
        }
        for h in &data.holes {
            tx.execute(
                "INSERT OR REPLACE INTO hole
                    (hole_id, season, number, par, handicap, handicap9, yards)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![h.id, year, h.number, h.par, h.handicap, h.handicap9, h.yards],
            )?;
        }
        for s in &data.scores {
            tx.execute(
                "INSERT OR REPLACE INTO score (golfer_id, week_id, hole_id, score)
                 VALUES (?1, ?2, ?3, ?4)",
                params![s.golfer, s.week, s.hole, s.score],
            )?;
        }
        for s in &data.subs {
            tx.execute(
                "INSERT OR REPLACE INTO sub (week_id, absent_golfer_id, sub_golfer_id, no_sub)
                 VALUES (?1, ?2, ?3, ?4)",
                params![s.week, s.absent_golfer, s.sub_golfer, s.no_sub],
            )?;
        }
        for m in &data.matchups {
            tx.execute(
                "INSERT OR REPLACE INTO matchup (matchup_id, week_id) VALUES (?1, ?2)",
                params![m.id, m.week],
            )?;
            tx.execute("DELETE FROM matchup_team WHERE matchup_id = ?1", [m.id])?;
            for (position, team) in m.teams.iter().enumerate() {
                tx.execute(
                    "INSERT INTO matchup_team (matchup_id, team_id, position) VALUES (?1, ?2, ?3)",
                    params![m.id, team, position as i64],
                )?;
            }
        }
        for e in &data.skin_entries {
            tx.execute(
                "INSERT OR IGNORE INTO skin_entry (golfer_id, week_id) VALUES (?1, ?2)",
                params![e.golfer, e.week],
            )?;
        }

        // previously computed results travel with the season
        write_batch(&tx, &engine_rows(data))?;
        tx.commit()?;
        Ok(())
    }
}

/// The engine-owned rows of a snapshot, grouped the way `apply` expects.
fn engine_rows(data: &SeasonData) -> WriteBatch {
    let mut batch = WriteBatch::new(data.year());
    batch.handicaps.clone_from(&data.handicaps);
    for week in &data.weeks {
        let results = WeekResults {
            week: week.id,
            golfer_matchups: data
                .golfer_matchups
                .iter()
                .filter(|g| g.week == week.id)
                .cloned()
                .collect(),
            points: data
                .points
                .iter()
                .filter(|p| p.week == week.id)
                .cloned()
                .collect(),
            rounds: data
                .rounds
                .iter()
                .filter(|r| r.week == week.id)
                .cloned()
                .collect(),
            drawn_teams: data
                .drawn_teams
                .iter()
                .filter(|d| d.week == week.id)
                .cloned()
                .collect(),
        };
        let empty = results.golfer_matchups.is_empty()
            && results.points.is_empty()
            && results.rounds.is_empty()
            && results.drawn_teams.is_empty();
        if !empty {
            batch.weeks.push(results);
        }
    }
    batch
}
