use std::io::Write;

use gradescope::cohort::CohortGrader;
use gradescope::config::GradingConfig;
use gradescope::loader::load_csv;
use gradescope::models::{Lookup, Subject};
use gradescope::projector::StudentProjector;

#[test]
fn csv_to_leaderboard_and_lookup() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "학생ID,학년,반,수학,영어,과학,출석률(%),성별").unwrap();
    for i in 0..20 {
        let math = 100 - i;
        let english = 60 + (i * 7) % 40;
        writeln!(file, "S{:04},1,A,{math},{english},75,{},F", 1000 + i, 80 + i).unwrap();
    }
    writeln!(file, "S2000,2,B,50,50,50,,M").unwrap();
    file.flush().unwrap();

    let table = load_csv(file.path()).expect("load");
    assert_eq!(table.len(), 21);

    let config = GradingConfig::default();
    let grader = CohortGrader::new(&config);
    let projector = StudentProjector::new(grader);

    // floors give 2, 4, 6, 4, 2; the two left over land in grade 5
    let math = grader.grade(&table, 1, Subject::Math).unwrap();
    let grades: Vec<u8> = math.iter().map(|s| s.subject_grade).collect();
    assert_eq!(
        grades,
        vec![1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5]
    );

    let board = projector.leaderboard(&table, 1, Subject::Math, 3).unwrap();
    let ids: Vec<&str> = board.iter().map(|s| s.student_id.as_str()).collect();
    assert_eq!(ids, vec!["S1000", "S1001", "S1002"]);

    match projector.project(&table, 1, Subject::Math, "S1000").unwrap() {
        Lookup::Found(standing) => {
            assert_eq!(standing.subject_rank, 1);
            assert_eq!(standing.subject_grade, 1);
        }
        other => panic!("expected a standing, got {other:?}"),
    }
    assert_eq!(
        projector.project(&table, 1, Subject::Math, "S2000").unwrap(),
        Lookup::StudentNotFound
    );
    assert_eq!(
        projector.project(&table, 3, Subject::Math, "S1000").unwrap(),
        Lookup::EmptyCohort
    );

    let profile = projector.profile(&table, "S2000").unwrap().found().unwrap();
    assert_eq!(profile.cohort_year, 2);
    assert_eq!(profile.subjects.len(), 3);
    assert_eq!(profile.overall_rank, 1);
    assert_eq!(profile.overall_grade, 5);
}
